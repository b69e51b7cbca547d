//! DynamoDB table store.
//!
//! Implements `TableStore` on top of `aws-sdk-dynamodb`, converting between
//! SDK attribute values and the core item model.

mod client;
mod conversions;
mod error;
mod store;

pub use store::DynamoDbStore;
