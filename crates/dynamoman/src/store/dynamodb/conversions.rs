//! DynamoDB attribute conversion functions.
//!
//! Pure functions converting between SDK attribute values and the core item
//! model. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::{self as sdk, KeySchemaElement, KeyType};
use dynamoman_core::item::{AttributeValue, Item};
use dynamoman_core::schema::{KeyAttribute, KeyRole, KeySchema};
use dynamoman_core::storage::StoreError;

use super::error::UnknownAttributeValue;

/// Convert a core attribute value to its SDK form.
pub fn value_to_sdk(value: AttributeValue) -> sdk::AttributeValue {
    match value {
        AttributeValue::S(s) => sdk::AttributeValue::S(s),
        AttributeValue::N(n) => sdk::AttributeValue::N(n),
        AttributeValue::B(b) => sdk::AttributeValue::B(Blob::new(b)),
        AttributeValue::Ss(v) => sdk::AttributeValue::Ss(v),
        AttributeValue::Ns(v) => sdk::AttributeValue::Ns(v),
        AttributeValue::Bs(v) => sdk::AttributeValue::Bs(v.into_iter().map(Blob::new).collect()),
        AttributeValue::Bool(b) => sdk::AttributeValue::Bool(b),
        AttributeValue::Null(b) => sdk::AttributeValue::Null(b),
        AttributeValue::L(list) => {
            sdk::AttributeValue::L(list.into_iter().map(value_to_sdk).collect())
        }
        AttributeValue::M(map) => sdk::AttributeValue::M(item_to_sdk(map)),
    }
}

/// Convert an SDK attribute value to the core model.
pub fn value_from_sdk(value: sdk::AttributeValue) -> Result<AttributeValue, UnknownAttributeValue> {
    Ok(match value {
        sdk::AttributeValue::S(s) => AttributeValue::S(s),
        sdk::AttributeValue::N(n) => AttributeValue::N(n),
        sdk::AttributeValue::B(b) => AttributeValue::B(b.into_inner()),
        sdk::AttributeValue::Ss(v) => AttributeValue::Ss(v),
        sdk::AttributeValue::Ns(v) => AttributeValue::Ns(v),
        sdk::AttributeValue::Bs(v) => AttributeValue::Bs(v.into_iter().map(Blob::into_inner).collect()),
        sdk::AttributeValue::Bool(b) => AttributeValue::Bool(b),
        sdk::AttributeValue::Null(b) => AttributeValue::Null(b),
        sdk::AttributeValue::L(list) => AttributeValue::L(
            list.into_iter()
                .map(value_from_sdk)
                .collect::<Result<_, _>>()?,
        ),
        sdk::AttributeValue::M(map) => AttributeValue::M(item_from_sdk(map)?),
        _ => return Err(UnknownAttributeValue),
    })
}

/// Convert a core item to an SDK item.
pub fn item_to_sdk(item: Item) -> HashMap<String, sdk::AttributeValue> {
    item.into_iter()
        .map(|(name, value)| (name, value_to_sdk(value)))
        .collect()
}

/// Convert an SDK item to a core item.
pub fn item_from_sdk(
    item: HashMap<String, sdk::AttributeValue>,
) -> Result<Item, UnknownAttributeValue> {
    item.into_iter()
        .map(|(name, value)| value_from_sdk(value).map(|value| (name, value)))
        .collect()
}

/// Build a key schema from the elements reported by DescribeTable.
pub fn key_schema_from_sdk(table: &str, elements: &[KeySchemaElement]) -> Result<KeySchema, StoreError> {
    let unavailable = |reason: String| StoreError::SchemaUnavailable {
        table: table.to_string(),
        reason,
    };

    let attributes = elements
        .iter()
        .map(|element| {
            let role = match element.key_type() {
                KeyType::Hash => KeyRole::Partition,
                KeyType::Range => KeyRole::Sort,
                other => {
                    return Err(unavailable(format!(
                        "unsupported key type '{}'",
                        other.as_str()
                    )))
                }
            };
            Ok(KeyAttribute::new(element.attribute_name(), role))
        })
        .collect::<Result<Vec<_>, _>>()?;

    KeySchema::from_elements(attributes).map_err(|e| unavailable(e.to_string()))
}
