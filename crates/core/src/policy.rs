//! Recoverable-failure policy shared by every table operation.
//!
//! An operation step ends in one of three ways: it completes
//! ([`Step::Done`]), it is skipped after a recoverable failure
//! ([`Step::Skipped`]), or it fails fatally (`Err`). Which of the last two a
//! recoverable failure becomes is decided by a [`FailurePolicy`].

use std::fmt;
use std::str::FromStr;

/// What to do with a recoverable failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure and carry on without the affected data.
    #[default]
    Skip,
    /// Treat the failure as fatal.
    Abort,
}

/// Outcome of a step that did not fail fatally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<T> {
    Done(T),
    Skipped { reason: String },
}

impl FailurePolicy {
    /// Resolves a step result according to this policy.
    pub fn resolve<T, E: fmt::Display>(self, result: Result<T, E>) -> Result<Step<T>, E> {
        match (result, self) {
            (Ok(value), _) => Ok(Step::Done(value)),
            (Err(err), Self::Skip) => Ok(Step::Skipped {
                reason: err.to_string(),
            }),
            (Err(err), Self::Abort) => Err(err),
        }
    }
}

impl<T> Step<T> {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "abort" => Ok(Self::Abort),
            other => Err(format!(
                "Invalid failure policy '{other}'. Expected 'skip' or 'abort'"
            )),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => f.write_str("skip"),
            Self::Abort => f.write_str("abort"),
        }
    }
}
