use crate::item::Item;
use crate::stage::stage_token;

use super::{FieldPath, RewriteError};

/// Paths rewritten when none are configured.
pub const DEFAULT_REWRITE_PATHS: &[&str] = &["thumbnail", "results[].thumbnail"];

/// Parses [`DEFAULT_REWRITE_PATHS`].
pub fn default_rewrite_paths() -> Vec<FieldPath> {
    DEFAULT_REWRITE_PATHS
        .iter()
        .filter_map(|path| FieldPath::parse(path).ok())
        .collect()
}

/// Replaces one stage token with another in a fixed set of string fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRewrite {
    from_token: String,
    to_token: String,
    paths: Vec<FieldPath>,
}

impl StageRewrite {
    /// Builds a rewrite from two stage identifiers.
    ///
    /// Tokens are whatever follows the last hyphen of each identifier, so
    /// `app-dev` and `-dev` both yield `dev`.
    pub fn from_stages(from: &str, to: &str, paths: Vec<FieldPath>) -> Result<Self, RewriteError> {
        Ok(Self {
            from_token: token_of(from)?,
            to_token: token_of(to)?,
            paths,
        })
    }

    pub fn from_token(&self) -> &str {
        &self.from_token
    }

    pub fn to_token(&self) -> &str {
        &self.to_token
    }

    pub fn paths(&self) -> &[FieldPath] {
        &self.paths
    }

    /// Rewrites the configured fields of `item` in place.
    ///
    /// Returns the number of string values that changed.
    pub fn apply(&self, item: &mut Item) -> usize {
        let replace = |value: &str| value.replace(&self.from_token, &self.to_token);
        self.paths
            .iter()
            .map(|path| path.apply(item, &replace))
            .sum()
    }
}

fn token_of(stage: &str) -> Result<String, RewriteError> {
    let token = stage_token(stage);
    if token.is_empty() {
        return Err(RewriteError::InvalidStage {
            stage: stage.to_string(),
        });
    }
    Ok(token.to_string())
}
