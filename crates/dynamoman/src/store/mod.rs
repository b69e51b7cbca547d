//! Table store implementations.
//!
//! Concrete implementations of `dynamoman_core::storage::TableStore`:
//!
//! - [`dynamodb`]: AWS DynamoDB (or DynamoDB Local) via `aws-sdk-dynamodb`
//! - `memory`: in-memory tables, compiled for tests only

pub mod dynamodb;

#[cfg(test)]
pub mod memory;

pub use dynamodb::DynamoDbStore;
