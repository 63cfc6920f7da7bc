use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{encode_name, padded_len, Container, Entry, Error, Result};

/// §4.5 — adds `data` to the container under `name`.
///
/// Fails with `NameTooLong` if `name`'s UTF-8 encoding exceeds 31 bytes,
/// `DuplicateName` if a live or soft-deleted entry already uses that name,
/// and `NoFreeSlot` if all 32 slots are occupied.
pub fn add(path: impl AsRef<Path>, name: &str, data: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let padded_name = encode_name(name)?;

    let mut container = Container::open(path)?;
    let header = container.read_header()?;
    let entries = container.read_entries()?;

    if Container::find_by_name(&entries, &padded_name).is_some() {
        return Err(Error::DuplicateName(name.to_string()));
    }
    let slot = Container::first_empty_slot(&entries).ok_or(Error::NoFreeSlot)?;

    let length = data.len() as u32;
    let start = header.next_free_offset;
    let padding = padded_len(length) - length;

    tracing::info!(
        path = %path.display(),
        name,
        slot,
        start,
        length,
        "adding file to container"
    );

    container.write_payload(start, data, padding)?;

    let created = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let entry = Entry {
        name: padded_name,
        start,
        length,
        kind: 0,
        flag: 0,
        reserved0: 0,
        created,
        reserved1: [0; 12],
    };
    container.write_entry(slot, &entry)?;

    let mut header = header;
    header.file_count += 1;
    header.next_free_offset = start + padded_len(length);
    container.write_header(&header)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{create, extract};

    fn fresh() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.zvfs");
        create(&path).unwrap();
        (dir, path)
    }

    #[test]
    fn add_then_extract_round_trips() {
        let (_dir, path) = fresh();
        add(&path, "a.txt", b"hello").unwrap();
        assert_eq!(extract(&path, "a.txt").unwrap(), b"hello");
    }

    #[test]
    fn add_advances_next_free_offset_by_padded_length() {
        let (_dir, path) = fresh();
        add(&path, "a.txt", b"hello").unwrap();

        let mut container = Container::open(&path).unwrap();
        let header = container.read_header().unwrap();
        assert_eq!(header.file_count, 1);
        assert_eq!(header.next_free_offset, crate::DATA_START_OFFSET + 64);

        let entries = container.read_entries().unwrap();
        assert_eq!(entries[0].start, crate::DATA_START_OFFSET);
        assert_eq!(entries[0].length, 5);
    }

    #[test]
    fn second_add_starts_after_first_padded_payload() {
        let (_dir, path) = fresh();
        add(&path, "a.txt", b"hello").unwrap(); // 5 bytes -> padded to 64
        add(&path, "b.txt", &vec![b'x'; 70]).unwrap();

        let mut container = Container::open(&path).unwrap();
        let entries = container.read_entries().unwrap();
        assert_eq!(entries[1].start, crate::DATA_START_OFFSET + 64);
        assert_eq!(entries[1].length, 70);

        let header = container.read_header().unwrap();
        assert_eq!(header.next_free_offset, crate::DATA_START_OFFSET + 64 + 128);
    }

    #[test]
    fn empty_payload_advances_offset_by_zero() {
        let (_dir, path) = fresh();
        add(&path, "empty", b"").unwrap();

        let mut container = Container::open(&path).unwrap();
        let header = container.read_header().unwrap();
        assert_eq!(header.next_free_offset, crate::DATA_START_OFFSET);
        let entries = container.read_entries().unwrap();
        assert_eq!(entries[0].length, 0);
    }

    #[test]
    fn exact_multiple_of_64_does_not_add_extra_padding() {
        let (_dir, path) = fresh();
        add(&path, "a.bin", &vec![0xAB; 64]).unwrap();
        let mut container = Container::open(&path).unwrap();
        assert_eq!(
            container.read_header().unwrap().next_free_offset,
            crate::DATA_START_OFFSET + 64
        );

        let (_dir2, path2) = fresh();
        add(&path2, "b.bin", &vec![0xAB; 65]).unwrap();
        let mut container2 = Container::open(&path2).unwrap();
        assert_eq!(
            container2.read_header().unwrap().next_free_offset,
            crate::DATA_START_OFFSET + 128
        );
    }

    #[test]
    fn rejects_name_over_31_bytes() {
        let (_dir, path) = fresh();
        let err = add(&path, &"a".repeat(32), b"x").unwrap_err();
        assert!(matches!(err, Error::NameTooLong(_)));
    }

    #[test]
    fn accepts_name_of_exactly_31_bytes() {
        let (_dir, path) = fresh();
        assert!(add(&path, &"a".repeat(31), b"x").is_ok());
    }

    #[test]
    fn rejects_duplicate_live_name() {
        let (_dir, path) = fresh();
        add(&path, "a.txt", b"one").unwrap();
        let err = add(&path, "a.txt", b"two").unwrap_err();
        assert!(matches!(err, Error::DuplicateName(_)));
    }

    #[test]
    fn rejects_duplicate_deleted_name() {
        let (_dir, path) = fresh();
        add(&path, "a.txt", b"one").unwrap();
        crate::ops::remove(&path, "a.txt").unwrap();
        let err = add(&path, "a.txt", b"two").unwrap_err();
        assert!(matches!(err, Error::DuplicateName(_)));
    }

    #[test]
    fn fails_with_no_free_slot_when_table_is_full() {
        let (_dir, path) = fresh();
        for i in 0..32 {
            add(&path, &format!("f{i}"), b"x").unwrap();
        }
        let err = add(&path, "overflow", b"x").unwrap_err();
        assert!(matches!(err, Error::NoFreeSlot));
    }

    #[test]
    fn add_ordering_invariance_same_mapping_regardless_of_order() {
        let (_dir1, path1) = fresh();
        add(&path1, "a", b"aaa").unwrap();
        add(&path1, "b", b"bb").unwrap();

        let (_dir2, path2) = fresh();
        add(&path2, "b", b"bb").unwrap();
        add(&path2, "a", b"aaa").unwrap();

        assert_eq!(extract(&path1, "a").unwrap(), extract(&path2, "a").unwrap());
        assert_eq!(extract(&path1, "b").unwrap(), extract(&path2, "b").unwrap());
    }
}
