use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// On-disk snapshot layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// Concatenated per-page JSON arrays.
    #[default]
    Fragments,
    /// One JSON item per line.
    JsonLines,
}

impl SnapshotFormat {
    /// File extension used for this layout.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Fragments => "json",
            Self::JsonLines => "jsonl",
        }
    }

    /// Snapshot path of `table` inside `dir`: `<dir>/<table>.<ext>`.
    pub fn path_for(self, dir: &Path, table: &str) -> PathBuf {
        dir.join(format!("{table}.{}", self.extension()))
    }
}

impl FromStr for SnapshotFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fragments" | "json" => Ok(Self::Fragments),
            "json-lines" | "jsonl" => Ok(Self::JsonLines),
            other => Err(format!(
                "Invalid snapshot format '{other}'. Expected 'fragments' or 'json-lines'"
            )),
        }
    }
}

impl fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fragments => f.write_str("fragments"),
            Self::JsonLines => f.write_str("json-lines"),
        }
    }
}
