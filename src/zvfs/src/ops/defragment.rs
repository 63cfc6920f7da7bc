use std::path::Path;

use crate::{padded_len, Container, Entry, Result, DATA_START_OFFSET, FILE_CAPACITY};

/// Result of §4.8 — how much the compaction reclaimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefragmentReport {
    pub removed_count: u16,
    pub removed_bytes: u64,
}

/// §4.8 — drops soft-deleted entries and compacts survivors to eliminate
/// gaps in both the entry table and the data region.
///
/// `keep` entries retain their original relative order; the compaction
/// cursor is never ahead of any source `start`, so reading each payload
/// fully into an owned buffer before writing it is always safe even when
/// source and destination ranges overlap.
pub fn defragment(path: impl AsRef<Path>) -> Result<DefragmentReport> {
    let path = path.as_ref();
    let mut container = Container::open(path)?;
    let mut header = container.read_header()?;
    let entries = container.read_entries()?;

    let (keep, drop): (Vec<Entry>, Vec<Entry>) =
        entries.into_iter().filter(|e| !e.is_empty()).partition(|e| !e.is_deleted());

    let removed_count = drop.len() as u16;
    let removed_bytes: u64 = drop.iter().map(|e| e.length as u64).sum();

    tracing::info!(
        path = %path.display(),
        removed_count,
        removed_bytes,
        kept = keep.len(),
        "defragmenting container"
    );

    let mut cursor = DATA_START_OFFSET;
    let mut compacted = Vec::with_capacity(keep.len());
    for mut entry in keep {
        let payload = container.read_payload(entry.start, entry.length)?;
        let padding = padded_len(entry.length) - entry.length;
        container.write_payload(cursor, &payload, padding)?;
        entry.start = cursor;
        cursor += padded_len(entry.length);
        compacted.push(entry);
    }

    for (slot, entry) in compacted.iter().enumerate() {
        container.write_entry(slot as u16, entry)?;
    }
    for slot in compacted.len()..FILE_CAPACITY as usize {
        container.write_entry(slot as u16, &Entry::default())?;
    }

    header.file_count = compacted.len() as u16;
    header.deleted_files = 0;
    header.next_free_offset = cursor;
    header.free_entry_offset = crate::FILE_TABLE_OFFSET + compacted.len() as u32 * crate::ENTRY_SIZE as u32;
    container.write_header(&header)?;
    container.truncate(cursor as u64)?;

    Ok(DefragmentReport {
        removed_count,
        removed_bytes,
    })
}
