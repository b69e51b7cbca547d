//! Command-line interface definition.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use dynamoman_core::policy::FailurePolicy;
use dynamoman_core::rewrite::FieldPath;
use dynamoman_core::snapshot::SnapshotFormat;

use crate::config::DEFAULT_REGION;

/// Back up, restore, clear and promote DynamoDB tables.
///
/// Without an action flag, lists the tables visible to the endpoint.
#[derive(Debug, Parser)]
#[command(name = "dynamoman")]
#[command(version, about, long_about = None)]
#[command(group(
    ArgGroup::new("action")
        .args(["clear", "restore", "backup", "backup_all", "restore_all", "from"])
        .multiple(false)
))]
pub struct Cli {
    /// Use local DynamoDB (http://localhost:8000) instead of AWS.
    #[arg(short, long)]
    pub local: bool,

    /// Delete every item of a table.
    ///
    /// Asks for confirmation unless --force is given or stdin is not a
    /// terminal.
    #[arg(short = 'd', long, value_name = "TABLE")]
    pub clear: Option<String>,

    /// Load a table from its snapshot file.
    #[arg(short = 'o', long, value_name = "TABLE")]
    pub restore: Option<String>,

    /// Write a snapshot file of a table.
    #[arg(short = 'w', long, value_name = "TABLE")]
    pub backup: Option<String>,

    /// Write snapshot files of all tables (restricted by --stage).
    #[arg(short = 'a', long)]
    pub backup_all: bool,

    /// Load all tables from their snapshot files (restricted by --stage).
    #[arg(short = 'u', long)]
    pub restore_all: bool,

    /// Stage suffix to copy from (e.g. -dev).
    #[arg(long, value_name = "STAGE", requires = "to", allow_hyphen_values = true)]
    pub from: Option<String>,

    /// Stage suffix to copy to (e.g. -production).
    #[arg(long, value_name = "STAGE", requires = "from", allow_hyphen_values = true)]
    pub to: Option<String>,

    /// Only sweep tables whose name ends with this suffix.
    #[arg(long, value_name = "SUFFIX", allow_hyphen_values = true)]
    pub stage: Option<String>,

    /// Custom DynamoDB endpoint.
    #[arg(long, env = "AWS_ENDPOINT_URL", value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// AWS region.
    #[arg(long, env = "AWS_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// Directory for snapshot files.
    #[arg(long, env = "DYNAMOMAN_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Snapshot layout: fragments (one JSON array per page) or json-lines.
    #[arg(long, env = "DYNAMOMAN_FORMAT", default_value = "fragments")]
    pub format: SnapshotFormat,

    /// What to do with an undecodable snapshot: skip or abort.
    #[arg(long, default_value = "skip", value_name = "POLICY")]
    pub on_decode_error: FailurePolicy,

    /// What to do with a page that cannot be encoded: skip or abort.
    #[arg(long, default_value = "skip", value_name = "POLICY")]
    pub on_encode_error: FailurePolicy,

    /// Field rewritten by stage copies (repeatable).
    /// Defaults to `thumbnail` and `results[].thumbnail`.
    #[arg(long = "rewrite-path", value_name = "PATH")]
    pub rewrite_paths: Vec<FieldPath>,

    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    #[command(flatten)]
    pub global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Silence the command output
    #[clap(long, global = true)]
    pub silent: bool,

    /// Enable verbose output
    #[clap(long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[clap(long, global = true, env = "DYNAMOMAN_LOG_JSON")]
    pub log_json: bool,
}

impl Global {
    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// The single action selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ListTables,
    Clear(String),
    Restore(String),
    Backup(String),
    BackupAll,
    RestoreAll,
    CopyStage { from: String, to: String },
}

impl Cli {
    /// Resolves the selected action. At most one is accepted by the parser.
    pub fn action(&self) -> Action {
        if let Some(table) = &self.clear {
            Action::Clear(table.clone())
        } else if let Some(table) = &self.restore {
            Action::Restore(table.clone())
        } else if let Some(table) = &self.backup {
            Action::Backup(table.clone())
        } else if self.backup_all {
            Action::BackupAll
        } else if self.restore_all {
            Action::RestoreAll
        } else if let (Some(from), Some(to)) = (&self.from, &self.to) {
            Action::CopyStage {
                from: from.clone(),
                to: to.clone(),
            }
        } else {
            Action::ListTables
        }
    }
}
