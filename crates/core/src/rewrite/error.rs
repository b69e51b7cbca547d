use thiserror::Error;

/// Errors raised while configuring a rewrite.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RewriteError {
    #[error("Invalid stage '{stage}': no stage token after the last '-'")]
    InvalidStage { stage: String },

    #[error("Invalid field path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },
}
