use std::path::PathBuf;

use dynamoman_core::policy::FailurePolicy;
use dynamoman_core::rewrite::{default_rewrite_paths, FieldPath};
use dynamoman_core::snapshot::SnapshotFormat;

use crate::cli::Cli;

/// Endpoint used by `--local`.
pub const LOCAL_ENDPOINT: &str = "http://localhost:8000";

/// Region reported for the local endpoint.
pub const LOCAL_REGION: &str = "localhost";

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

/// AWS client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsConfig {
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<String>,
    /// AWS region.
    pub region: String,
}

impl AwsConfig {
    /// Configuration for DynamoDB Local on its default port.
    pub fn local() -> Self {
        Self {
            endpoint_url: Some(LOCAL_ENDPOINT.to_string()),
            region: LOCAL_REGION.to_string(),
        }
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}

/// Options shared by the snapshot operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    pub format: SnapshotFormat,
    /// Applied when a scanned page cannot be encoded.
    pub on_encode_error: FailurePolicy,
    /// Applied when a snapshot file cannot be decoded.
    pub on_decode_error: FailurePolicy,
}

/// Resolved run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub aws: AwsConfig,
    /// Directory holding `<table>.<ext>` snapshot files.
    pub snapshot_dir: PathBuf,
    /// Table-name suffix restricting backup-all and restore-all.
    pub stage: Option<String>,
    pub options: EngineOptions,
    /// Fields rewritten by stage copies.
    pub rewrite_paths: Vec<FieldPath>,
    /// Skip confirmation prompts.
    pub force: bool,
}

impl Config {
    /// Builds the run configuration from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        let aws = if cli.local {
            AwsConfig::local()
        } else {
            AwsConfig {
                endpoint_url: cli.endpoint_url.clone(),
                region: cli.region.clone(),
            }
        };

        let rewrite_paths = if cli.rewrite_paths.is_empty() {
            default_rewrite_paths()
        } else {
            cli.rewrite_paths.clone()
        };

        Self {
            aws,
            snapshot_dir: cli.dir.clone(),
            stage: cli.stage.clone().filter(|s| !s.is_empty()),
            options: EngineOptions {
                format: cli.format,
                on_encode_error: cli.on_encode_error,
                on_decode_error: cli.on_decode_error,
            },
            rewrite_paths,
            force: cli.force,
        }
    }
}
