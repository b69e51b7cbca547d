//! Pure functions for deployment-stage naming.
//!
//! A stage is encoded as a table-name suffix (`orders-dev`) and, inside some
//! string fields, as a bare token (`dev`).

/// Returns the stage token of a stage identifier: everything after its last
/// hyphen, or the whole identifier when it has none.
///
/// ```
/// use dynamoman_core::stage::stage_token;
///
/// assert_eq!(stage_token("app-dev"), "dev");
/// assert_eq!(stage_token("-production"), "production");
/// assert_eq!(stage_token("dev"), "dev");
/// ```
pub fn stage_token(stage: &str) -> &str {
    match stage.rfind('-') {
        Some(index) => &stage[index + 1..],
        None => stage,
    }
}

/// Selects the names that end with `suffix`, preserving their order.
pub fn filter_by_stage_suffix<S: AsRef<str>>(names: &[S], suffix: &str) -> Vec<String> {
    names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| name.ends_with(suffix))
        .map(str::to_string)
        .collect()
}

/// Replaces a trailing `from` suffix with `to`.
///
/// Names that do not end with `from` are returned unchanged.
pub fn derive_destination_name(name: &str, from: &str, to: &str) -> String {
    match name.strip_suffix(from) {
        Some(stem) => format!("{stem}{to}"),
        None => name.to_string(),
    }
}
