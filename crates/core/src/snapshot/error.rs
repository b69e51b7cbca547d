use thiserror::Error;

/// Errors produced by the snapshot codec.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to encode page: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode snapshot: {0}")]
    Decode(#[source] serde_json::Error),
}
