use thiserror::Error;

/// Errors reported by a table store.
///
/// Every variant is fatal to the operation that hit it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Table '{table}' not found")]
    TableNotFound { table: String },

    #[error("Key schema of '{table}' unavailable: {reason}")]
    SchemaUnavailable { table: String, reason: String },

    #[error("Scan of '{table}' failed: {reason}")]
    ScanFailed { table: String, reason: String },

    #[error("Put into '{table}' failed: {reason}")]
    PutFailed { table: String, reason: String },

    #[error("Delete from '{table}' failed: {reason}")]
    DeleteFailed { table: String, reason: String },

    #[error("Listing tables failed: {0}")]
    ListFailed(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
