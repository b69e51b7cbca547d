//! Functional core for dynamoman.
//!
//! Pure data types and functions shared by the table tools: attribute values,
//! key schemas, stage naming, field rewriting, the snapshot codec and the
//! [`storage::TableStore`] seam that the imperative shell implements.

pub mod item;
pub mod policy;
pub mod rewrite;
pub mod schema;
pub mod snapshot;
pub mod stage;
pub mod storage;
