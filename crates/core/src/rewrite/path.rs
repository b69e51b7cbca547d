use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::item::{AttributeValue, Item};

use super::RewriteError;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Descend into the named attribute of a map.
    Attribute(String),
    /// Visit every element of a list.
    Each,
}

/// Path to string attributes inside an item.
///
/// Written as dot-separated attribute names; a `[]` after a name visits
/// every element of the list stored there. `thumbnail` addresses a
/// top-level attribute, `results[].thumbnail` the `thumbnail` of each map
/// in the `results` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Parses a path expression.
    pub fn parse(path: &str) -> Result<Self, RewriteError> {
        let invalid = |reason| RewriteError::InvalidPath {
            path: path.to_string(),
            reason,
        };

        if path.is_empty() {
            return Err(invalid("path is empty"));
        }

        let mut segments = Vec::new();
        for part in path.split('.') {
            let mut name = part;
            let mut lists = 0;
            while let Some(stem) = name.strip_suffix("[]") {
                name = stem;
                lists += 1;
            }

            if name.is_empty() {
                return Err(invalid("every segment needs an attribute name"));
            }
            if name.contains(['[', ']']) {
                return Err(invalid("brackets are only allowed as a trailing '[]'"));
            }

            segments.push(Segment::Attribute(name.to_string()));
            segments.extend(std::iter::repeat_n(Segment::Each, lists));
        }

        Ok(Self {
            raw: path.to_string(),
            segments,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Rewrites every string the path reaches with `transform`.
    ///
    /// Values whose shape does not match the path are skipped. Returns the
    /// number of strings that actually changed.
    pub fn apply<F>(&self, item: &mut Item, transform: &F) -> usize
    where
        F: Fn(&str) -> String,
    {
        apply_map(item, &self.segments, transform)
    }
}

fn apply_map<F>(map: &mut HashMap<String, AttributeValue>, segments: &[Segment], transform: &F) -> usize
where
    F: Fn(&str) -> String,
{
    match segments.split_first() {
        Some((Segment::Attribute(name), rest)) => map
            .get_mut(name)
            .map_or(0, |value| apply_value(value, rest, transform)),
        _ => 0,
    }
}

fn apply_value<F>(value: &mut AttributeValue, segments: &[Segment], transform: &F) -> usize
where
    F: Fn(&str) -> String,
{
    match (segments.first(), value) {
        (None, AttributeValue::S(s)) => {
            let rewritten = transform(s);
            if rewritten == *s {
                0
            } else {
                *s = rewritten;
                1
            }
        }
        (Some(Segment::Attribute(_)), AttributeValue::M(map)) => {
            apply_map(map, segments, transform)
        }
        (Some(Segment::Each), AttributeValue::L(list)) => list
            .iter_mut()
            .map(|element| apply_value(element, &segments[1..], transform))
            .sum(),
        _ => 0,
    }
}

impl FromStr for FieldPath {
    type Err = RewriteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
