//! Attribute value tagged union and its DynamoDB JSON form.
//!
//! The JSON form is a single-key object naming the type, e.g. `{"S":"hello"}`
//! or `{"L":[{"N":"1"}]}`. Binary payloads are base64 encoded.

use std::collections::HashMap;
use std::fmt;

use base64::Engine;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const TYPE_KEYS: &[&str] = &["S", "N", "B", "SS", "NS", "BS", "BOOL", "NULL", "L", "M"];

/// A typed attribute value.
///
/// Numbers stay string-encoded so no precision is lost in transit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    S(String),
    N(String),
    B(Vec<u8>),
    Ss(Vec<String>),
    Ns(Vec<String>),
    Bs(Vec<Vec<u8>>),
    Bool(bool),
    Null(bool),
    L(Vec<AttributeValue>),
    M(HashMap<String, AttributeValue>),
}

impl AttributeValue {
    /// Returns the string if this is an `S` value.
    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the list if this is an `L` value.
    pub fn as_l(&self) -> Option<&[AttributeValue]> {
        match self {
            Self::L(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the map if this is an `M` value.
    pub fn as_m(&self) -> Option<&HashMap<String, AttributeValue>> {
        match self {
            Self::M(m) => Some(m),
            _ => None,
        }
    }

    /// The type descriptor used as the JSON key ("S", "N", "BOOL", ...).
    pub fn type_descriptor(&self) -> &'static str {
        match self {
            Self::S(_) => "S",
            Self::N(_) => "N",
            Self::B(_) => "B",
            Self::Ss(_) => "SS",
            Self::Ns(_) => "NS",
            Self::Bs(_) => "BS",
            Self::Bool(_) => "BOOL",
            Self::Null(_) => "NULL",
            Self::L(_) => "L",
            Self::M(_) => "M",
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::S(s) => write!(f, "{s}"),
            Self::N(n) => write!(f, "{n}"),
            Self::B(b) => write!(f, "<{} bytes>", b.len()),
            Self::Ss(v) | Self::Ns(v) => write!(f, "{v:?}"),
            Self::Bs(v) => write!(f, "<{} binaries>", v.len()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null(_) => write!(f, "null"),
            Self::L(v) => write!(f, "<{} elements>", v.len()),
            Self::M(m) => write!(f, "<{} attributes>", m.len()),
        }
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let engine = base64::engine::general_purpose::STANDARD;
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::S(s) => map.serialize_entry("S", s)?,
            Self::N(n) => map.serialize_entry("N", n)?,
            Self::B(b) => map.serialize_entry("B", &engine.encode(b))?,
            Self::Ss(v) => map.serialize_entry("SS", v)?,
            Self::Ns(v) => map.serialize_entry("NS", v)?,
            Self::Bs(v) => {
                let encoded: Vec<String> = v.iter().map(|b| engine.encode(b)).collect();
                map.serialize_entry("BS", &encoded)?;
            }
            Self::Bool(b) => map.serialize_entry("BOOL", b)?,
            Self::Null(b) => map.serialize_entry("NULL", b)?,
            Self::L(list) => map.serialize_entry("L", list)?,
            Self::M(m) => map.serialize_entry("M", m)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AttributeValueVisitor)
    }
}

struct AttributeValueVisitor;

impl<'de> Visitor<'de> for AttributeValueVisitor {
    type Value = AttributeValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an attribute value object with exactly one type key")
    }

    /// Accepts both the compact form (`{"S":"x"}`) and the form where every
    /// type key is present and all but one are `null`.
    fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
        let engine = base64::engine::general_purpose::STANDARD;
        let decode_binary = |encoded: String| -> Result<Vec<u8>, M::Error> {
            engine.decode(encoded).map_err(de::Error::custom)
        };

        let mut found: Option<AttributeValue> = None;

        while let Some(key) = map.next_key::<String>()? {
            let value = match key.as_str() {
                "S" => map.next_value::<Option<String>>()?.map(AttributeValue::S),
                "N" => map.next_value::<Option<String>>()?.map(AttributeValue::N),
                "B" => match map.next_value::<Option<String>>()? {
                    Some(encoded) => Some(AttributeValue::B(decode_binary(encoded)?)),
                    None => None,
                },
                "SS" => map.next_value::<Option<Vec<String>>>()?.map(AttributeValue::Ss),
                "NS" => map.next_value::<Option<Vec<String>>>()?.map(AttributeValue::Ns),
                "BS" => match map.next_value::<Option<Vec<String>>>()? {
                    Some(encoded) => Some(AttributeValue::Bs(
                        encoded
                            .into_iter()
                            .map(decode_binary)
                            .collect::<Result<Vec<_>, _>>()?,
                    )),
                    None => None,
                },
                "BOOL" => map.next_value::<Option<bool>>()?.map(AttributeValue::Bool),
                "NULL" => map.next_value::<Option<bool>>()?.map(AttributeValue::Null),
                "L" => map.next_value::<Option<Vec<AttributeValue>>>()?.map(AttributeValue::L),
                "M" => map
                    .next_value::<Option<HashMap<String, AttributeValue>>>()?
                    .map(AttributeValue::M),
                other => return Err(de::Error::unknown_field(other, TYPE_KEYS)),
            };

            let Some(value) = value else {
                continue;
            };
            if let Some(previous) = &found {
                return Err(de::Error::custom(format!(
                    "attribute value has more than one type key (found '{key}' after '{}')",
                    previous.type_descriptor()
                )));
            }
            found = Some(value);
        }

        found.ok_or_else(|| de::Error::custom("attribute value has no non-null type key"))
    }
}
