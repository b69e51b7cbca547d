//! Snapshot file encoding.
//!
//! Two layouts are supported:
//!
//! - [`SnapshotFormat::Fragments`]: one JSON array per scanned page, written
//!   back to back with no separator. A snapshot of a multi-page table is
//!   therefore not a single JSON document, and only single-fragment files
//!   decode. This is the layout existing backups use.
//! - [`SnapshotFormat::JsonLines`]: one item per line, independent of how
//!   many pages the scan produced.

mod codec;
mod error;
mod format;

pub use codec::{decode, encode_page};
pub use error::SnapshotError;
pub use format::SnapshotFormat;
