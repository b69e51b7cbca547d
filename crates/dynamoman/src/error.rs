//! Error types for table operations.

use dynamoman_core::rewrite::RewriteError;
use dynamoman_core::schema::SchemaError;
use dynamoman_core::snapshot::SnapshotError;
use dynamoman_core::storage::StoreError;
use thiserror::Error;

/// Result type alias for table operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Fatal errors of a table operation.
///
/// Recoverable failures never surface here unless their policy is `Abort`.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Rewrite(#[from] RewriteError),

    #[error("Snapshot of '{table}' unusable: {source}")]
    Snapshot {
        table: String,
        #[source]
        source: SnapshotError,
    },

    #[error("Snapshot I/O for '{table}' failed: {source}")]
    SnapshotIo {
        table: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Item in '{table}' has no usable key: {source}")]
    MissingKeyAttribute {
        table: String,
        #[source]
        source: SchemaError,
    },

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Operation cancelled by user")]
    UserCancelled,
}

impl EngineError {
    pub(crate) fn io(table: &str, source: std::io::Error) -> Self {
        Self::SnapshotIo {
            table: table.to_string(),
            source,
        }
    }
}
