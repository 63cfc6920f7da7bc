use std::path::Path;

use crate::{encode_name, Container, Error, Result};

/// §4.6 — reads the full payload of `name` into memory.
///
/// Matches live *and* soft-deleted entries: a deleted entry's bytes remain
/// physically present and valid until `defragment` runs. Does not mutate
/// the container.
pub fn extract(path: impl AsRef<Path>, name: &str) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let padded_name = encode_name(name)?;

    let mut container = Container::open_read_only(path)?;
    let entries = container.read_entries()?;
    let slot = Container::find_by_name(&entries, &padded_name)
        .ok_or_else(|| Error::NotFound(name.to_string()))?;
    let entry = &entries[slot as usize];

    tracing::debug!(
        path = %path.display(),
        name,
        start = entry.start,
        length = entry.length,
        deleted = entry.is_deleted(),
        "extracting file"
    );

    container.read_payload(entry.start, entry.length)
}
