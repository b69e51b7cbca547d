//! Items and their typed attribute values.

mod attribute_value;

use std::collections::HashMap;

pub use attribute_value::AttributeValue;

/// One record: attribute name to typed value.
///
/// Items in the same table need not share attribute sets.
pub type Item = HashMap<String, AttributeValue>;
