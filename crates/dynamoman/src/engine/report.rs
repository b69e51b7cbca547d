use std::fmt;

/// What an operation did to one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferReport {
    pub table: String,
    /// Table written to by a stage copy.
    pub destination: Option<String>,
    /// Scan pages visited.
    pub pages: usize,
    /// Items written, deleted or copied.
    pub items: usize,
    /// Reasons for every page or snapshot skipped under the skip policy.
    pub skipped: Vec<String>,
    /// String values changed by a stage rewrite.
    pub rewritten: usize,
}

impl TransferReport {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            ..Self::default()
        }
    }

    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl fmt::Display for TransferReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table)?;
        if let Some(destination) = &self.destination {
            write!(f, " -> {}", destination)?;
        }
        write!(f, ": {} items", self.items)?;
        if self.pages > 0 {
            write!(f, " in {} pages", self.pages)?;
        }
        if self.rewritten > 0 {
            write!(f, ", {} values rewritten", self.rewritten)?;
        }
        if !self.skipped.is_empty() {
            write!(f, ", {} skipped", self.skipped.len())?;
        }
        Ok(())
    }
}
