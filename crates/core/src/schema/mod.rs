mod error;
mod types;

pub use error::SchemaError;
pub use types::{KeyAttribute, KeyRole, KeySchema};
