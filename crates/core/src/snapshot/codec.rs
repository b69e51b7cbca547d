use crate::item::Item;

use super::{SnapshotError, SnapshotFormat};

/// Encodes one scanned page as the bytes appended to a snapshot.
///
/// For [`SnapshotFormat::Fragments`] this is a complete JSON array, even for
/// an empty page. For [`SnapshotFormat::JsonLines`] it is one line per item.
pub fn encode_page(format: SnapshotFormat, items: &[Item]) -> Result<Vec<u8>, SnapshotError> {
    match format {
        SnapshotFormat::Fragments => serde_json::to_vec(items).map_err(SnapshotError::Encode),
        SnapshotFormat::JsonLines => {
            let mut buffer = Vec::new();
            for item in items {
                serde_json::to_writer(&mut buffer, item).map_err(SnapshotError::Encode)?;
                buffer.push(b'\n');
            }
            Ok(buffer)
        }
    }
}

/// Decodes a whole snapshot into its items, in file order.
///
/// A fragments snapshot must hold exactly one JSON array; anything else,
/// including several concatenated arrays, is a decode error.
pub fn decode(format: SnapshotFormat, bytes: &[u8]) -> Result<Vec<Item>, SnapshotError> {
    match format {
        SnapshotFormat::Fragments => serde_json::from_slice(bytes).map_err(SnapshotError::Decode),
        SnapshotFormat::JsonLines => bytes
            .split(|b| *b == b'\n')
            .map(<[u8]>::trim_ascii)
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_slice(line).map_err(SnapshotError::Decode))
            .collect(),
    }
}
