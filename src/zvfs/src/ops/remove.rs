use std::path::Path;

use crate::{encode_name, Container, Error, Result};

/// §4.7 — soft-deletes the entry named `name`.
///
/// Flips the entry's flag byte to deleted without touching its payload or
/// `start`/`length`, so the bytes remain recoverable by [`crate::ops::extract`]
/// until [`crate::ops::defragment`] runs.
pub fn remove(path: impl AsRef<Path>, name: &str) -> Result<()> {
    let path = path.as_ref();
    let padded_name = encode_name(name)?;

    let mut container = Container::open(path)?;
    let mut header = container.read_header()?;
    let entries = container.read_entries()?;
    let slot = Container::find_by_name(&entries, &padded_name)
        .ok_or_else(|| Error::NotFound(name.to_string()))?;

    let mut entry = entries[slot as usize];
    if entry.is_deleted() {
        return Err(Error::AlreadyDeleted(name.to_string()));
    }

    tracing::info!(path = %path.display(), name, slot, "removing file");

    entry.mark_deleted();
    container.write_entry(slot, &entry)?;

    header.file_count -= 1;
    header.deleted_files += 1;
    container.write_header(&header)?;

    Ok(())
}
