//! Field-path string rewriting.
//!
//! A [`FieldPath`] addresses string attributes inside an item, possibly
//! through nested maps and lists. [`StageRewrite`] applies a stage token
//! substitution to a set of such paths, leaving everything else untouched.

mod error;
mod path;
mod stage;

pub use error::RewriteError;
pub use path::{FieldPath, Segment};
pub use stage::{default_rewrite_paths, StageRewrite, DEFAULT_REWRITE_PATHS};
