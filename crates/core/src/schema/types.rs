use crate::item::Item;

use super::SchemaError;

/// Role of a key attribute within a primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    /// Partition (hash) key.
    Partition,
    /// Sort (range) key.
    Sort,
}

impl KeyRole {
    fn label(self) -> &'static str {
        match self {
            Self::Partition => "partition",
            Self::Sort => "sort",
        }
    }
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub role: KeyRole,
}

impl KeyAttribute {
    pub fn new(name: impl Into<String>, role: KeyRole) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }
}

/// Primary key schema of a table: a partition key and an optional sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
}

impl KeySchema {
    /// Schema with only a partition key.
    pub fn partition(name: impl Into<String>) -> Self {
        Self {
            partition_key: KeyAttribute::new(name, KeyRole::Partition),
            sort_key: None,
        }
    }

    /// Adds a sort key.
    pub fn with_sort_key(mut self, name: impl Into<String>) -> Self {
        self.sort_key = Some(KeyAttribute::new(name, KeyRole::Sort));
        self
    }

    /// Builds a schema from the key elements a store reports, in any order.
    pub fn from_elements<I>(elements: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = KeyAttribute>,
    {
        let mut partition_key = None;
        let mut sort_key = None;

        for element in elements {
            let slot = match element.role {
                KeyRole::Partition => &mut partition_key,
                KeyRole::Sort => &mut sort_key,
            };
            if slot.is_some() {
                return Err(SchemaError::DuplicateRole {
                    role: element.role.label(),
                });
            }
            *slot = Some(element);
        }

        Ok(Self {
            partition_key: partition_key.ok_or(SchemaError::MissingPartitionKey)?,
            sort_key,
        })
    }

    /// Key attributes in schema order (partition first).
    pub fn attributes(&self) -> impl Iterator<Item = &KeyAttribute> {
        std::iter::once(&self.partition_key).chain(self.sort_key.as_ref())
    }

    /// Key attribute names in schema order.
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes().map(|a| a.name.as_str()).collect()
    }

    /// Projects an item down to its primary key attributes.
    pub fn project(&self, item: &Item) -> Result<Item, SchemaError> {
        self.attributes()
            .map(|attribute| {
                item.get(&attribute.name)
                    .map(|value| (attribute.name.clone(), value.clone()))
                    .ok_or_else(|| SchemaError::MissingKeyAttribute {
                        attribute: attribute.name.clone(),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::AttributeValue;

    fn s(value: &str) -> AttributeValue {
        AttributeValue::S(value.to_string())
    }

    #[test]
    fn test_from_elements_any_order() {
        let schema = KeySchema::from_elements([
            KeyAttribute::new("SK", KeyRole::Sort),
            KeyAttribute::new("PK", KeyRole::Partition),
        ])
        .unwrap();

        assert_eq!(schema, KeySchema::partition("PK").with_sort_key("SK"));
        assert_eq!(schema.attribute_names(), vec!["PK", "SK"]);
    }

    #[test]
    fn test_from_elements_requires_partition_key() {
        let result = KeySchema::from_elements([KeyAttribute::new("SK", KeyRole::Sort)]);
        assert_eq!(result, Err(SchemaError::MissingPartitionKey));
    }

    #[test]
    fn test_from_elements_rejects_two_partition_keys() {
        let result = KeySchema::from_elements([
            KeyAttribute::new("a", KeyRole::Partition),
            KeyAttribute::new("b", KeyRole::Partition),
        ]);
        assert_eq!(
            result,
            Err(SchemaError::DuplicateRole { role: "partition" })
        );
    }

    #[test]
    fn test_project_keeps_only_key_attributes() {
        let schema = KeySchema::partition("PK").with_sort_key("SK");
        let item: Item = [
            ("PK".to_string(), s("user#1")),
            ("SK".to_string(), s("profile")),
            ("name".to_string(), s("Ada")),
        ]
        .into_iter()
        .collect();

        let key = schema.project(&item).unwrap();

        assert_eq!(key.len(), 2);
        assert_eq!(key.get("PK"), Some(&s("user#1")));
        assert_eq!(key.get("SK"), Some(&s("profile")));
    }

    #[test]
    fn test_project_reports_missing_attribute() {
        let schema = KeySchema::partition("PK").with_sort_key("SK");
        let item: Item = [("PK".to_string(), s("user#1"))].into_iter().collect();

        assert_eq!(
            schema.project(&item),
            Err(SchemaError::MissingKeyAttribute {
                attribute: "SK".to_string()
            })
        );
    }
}
