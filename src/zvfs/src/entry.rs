use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::{Error, Result};

/// Size, in bytes, of the on-disk entry frame.
pub const ENTRY_SIZE: usize = 64;
/// Width, in bytes, of the `name` field (31 usable bytes + NUL padding).
pub const NAME_SIZE: usize = 32;

/// Flag byte distinguishing a live entry from a soft-deleted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFlag {
    Live,
    Deleted,
}

impl EntryFlag {
    fn from_byte(byte: u8) -> Self {
        if byte == 0 {
            EntryFlag::Live
        } else {
            EntryFlag::Deleted
        }
    }

    fn to_byte(self) -> u8 {
        match self {
            EntryFlag::Live => 0,
            EntryFlag::Deleted => 1,
        }
    }
}

/// # Entry table slot
///
/// One 64-byte record per stored file. A slot whose `name` is all zero is
/// empty; any other slot is live (`flag` 0) or soft-deleted (`flag` 1).
///
/// | Offset | Size | Field     | Description |
/// | ------ | ---- | --------- | ----------- |
/// | 0      | 32   | name      | UTF-8 filename, NUL-padded. |
/// | 32     | 4    | start     | Byte offset of the payload. |
/// | 36     | 4    | length    | Payload length, excluding padding. |
/// | 40     | 1    | type      | Reserved, currently 0. |
/// | 41     | 1    | flag      | 0 = live, 1 = soft-deleted. |
/// | 42     | 2    | reserved0 | Zero. |
/// | 44     | 8    | created   | Creation time, Unix seconds. |
/// | 52     | 12   | reserved1 | Zero. |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub name: [u8; NAME_SIZE],
    pub start: u32,
    pub length: u32,
    pub kind: u8,
    pub flag: u8,
    pub reserved0: u16,
    pub created: u64,
    pub reserved1: [u8; 12],
}

impl Default for Entry {
    /// The all-zero empty slot.
    fn default() -> Self {
        Entry {
            name: [0; NAME_SIZE],
            start: 0,
            length: 0,
            kind: 0,
            flag: 0,
            reserved0: 0,
            created: 0,
            reserved1: [0; 12],
        }
    }
}

impl Entry {
    /// Decodes an entry from a 64-byte little-endian frame.
    pub fn from_bytes(bytes: &[u8]) -> Result<Entry> {
        if bytes.len() != ENTRY_SIZE {
            return Err(Error::Malformed(format!(
                "entry frame must be {ENTRY_SIZE} bytes, got {}",
                bytes.len()
            )));
        }

        let mut cursor = Cursor::new(bytes);
        let mut name = [0u8; NAME_SIZE];
        cursor.read_exact(&mut name)?;
        let start = cursor.read_u32::<LittleEndian>()?;
        let length = cursor.read_u32::<LittleEndian>()?;
        let kind = cursor.read_u8()?;
        let flag = cursor.read_u8()?;
        let reserved0 = cursor.read_u16::<LittleEndian>()?;
        let created = cursor.read_u64::<LittleEndian>()?;
        let mut reserved1 = [0u8; 12];
        cursor.read_exact(&mut reserved1)?;

        Ok(Entry {
            name,
            start,
            length,
            kind,
            flag,
            reserved0,
            created,
            reserved1,
        })
    }

    /// Encodes the entry into a 64-byte little-endian frame.
    pub fn to_bytes(&self) -> [u8; ENTRY_SIZE] {
        let mut buffer = Vec::with_capacity(ENTRY_SIZE);
        buffer.extend_from_slice(&self.name);
        buffer.write_u32::<LittleEndian>(self.start).unwrap();
        buffer.write_u32::<LittleEndian>(self.length).unwrap();
        buffer.push(self.kind);
        buffer.push(self.flag);
        buffer.write_u16::<LittleEndian>(self.reserved0).unwrap();
        buffer.write_u64::<LittleEndian>(self.created).unwrap();
        buffer.extend_from_slice(&self.reserved1);

        buffer.try_into().unwrap()
    }

    /// An empty slot has an all-zero name.
    pub fn is_empty(&self) -> bool {
        self.name == [0u8; NAME_SIZE]
    }

    /// `flag == 1`.
    pub fn is_deleted(&self) -> bool {
        EntryFlag::from_byte(self.flag) == EntryFlag::Deleted
    }

    /// Non-empty and `flag == 0`.
    pub fn is_live(&self) -> bool {
        !self.is_empty() && EntryFlag::from_byte(self.flag) == EntryFlag::Live
    }

    /// Marks the entry as soft-deleted.
    pub fn mark_deleted(&mut self) {
        self.flag = EntryFlag::Deleted.to_byte();
    }

    /// Decodes the UTF-8 filename, stopping at the first NUL byte.
    ///
    /// Returns `Malformed` if the bytes up to the first NUL are not valid
    /// UTF-8; the codec itself never produces such a slot, but a corrupt or
    /// hand-edited container might.
    pub fn filename(&self) -> Result<String> {
        let end = self.name.iter().position(|&b| b == 0).unwrap_or(NAME_SIZE);
        std::str::from_utf8(&self.name[..end])
            .map(str::to_owned)
            .map_err(|_| Error::Malformed("entry name is not valid UTF-8".to_string()))
    }
}

/// Encodes `name` as a NUL-padded 32-byte array, as used by `name` comparisons
/// and new-entry construction.
///
/// Fails with `NameTooLong` if the UTF-8 encoding exceeds
/// [`crate::MAX_NAME_LEN`] bytes.
pub fn encode_name(name: &str) -> Result<[u8; NAME_SIZE]> {
    let bytes = name.as_bytes();
    if bytes.len() > crate::MAX_NAME_LEN {
        return Err(Error::NameTooLong(name.to_string()));
    }

    let mut padded = [0u8; NAME_SIZE];
    padded[..bytes.len()].copy_from_slice(bytes);
    Ok(padded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_default_entry() {
        let entry = Entry::default();
        let decoded = Entry::from_bytes(&entry.to_bytes()).unwrap();
        assert_eq!(decoded, entry);
    }

    #[test]
    fn pack_of_unpack_is_bit_exact() {
        let bytes: Vec<u8> = (0u8..64).map(|b| b.wrapping_mul(3)).collect();
        let entry = Entry::from_bytes(&bytes).unwrap();
        assert_eq!(entry.to_bytes().to_vec(), bytes);
    }

    #[test]
    fn rejects_wrong_length() {
        let err = Entry::from_bytes(&[0u8; 63]).unwrap_err();
        assert!(matches!(err, Error::Malformed(_)));
    }

    #[test]
    fn default_entry_is_empty_and_live() {
        let entry = Entry::default();
        assert!(entry.is_empty());
        assert!(!entry.is_live());
        assert!(!entry.is_deleted());
    }

    #[test]
    fn mark_deleted_flips_flag_without_is_live() {
        let mut entry = Entry {
            name: encode_name("a.txt").unwrap(),
            length: 5,
            ..Entry::default()
        };
        assert!(entry.is_live());
        entry.mark_deleted();
        assert!(!entry.is_live());
        assert!(entry.is_deleted());
    }

    #[test]
    fn encode_name_pads_and_rejects_too_long() {
        let padded = encode_name("a.txt").unwrap();
        assert_eq!(&padded[..5], b"a.txt");
        assert!(padded[5..].iter().all(|&b| b == 0));

        let exactly_31 = "a".repeat(31);
        assert!(encode_name(&exactly_31).is_ok());

        let too_long = "a".repeat(32);
        assert!(matches!(
            encode_name(&too_long),
            Err(Error::NameTooLong(_))
        ));
    }

    #[test]
    fn filename_stops_at_first_nul() {
        let entry = Entry {
            name: encode_name("readme.md").unwrap(),
            ..Entry::default()
        };
        assert_eq!(entry.filename().unwrap(), "readme.md");
    }
}
