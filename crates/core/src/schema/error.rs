use thiserror::Error;

/// Errors raised while building or applying a key schema.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Key schema has no partition key")]
    MissingPartitionKey,

    #[error("Key schema declares more than one {role} key")]
    DuplicateRole { role: &'static str },

    #[error("Item is missing key attribute '{attribute}'")]
    MissingKeyAttribute { attribute: String },
}
