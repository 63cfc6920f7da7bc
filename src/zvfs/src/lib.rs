//! A fixed-capacity single-file virtual filesystem.
//!
//! A container is one host file laid out as a 64-byte [`Header`], followed
//! by a fixed table of 32 [`Entry`] slots, followed by a data region holding
//! the file payloads themselves. See [`Container`] for the region layout
//! and [`ops`] for the operations built on top of it.

mod container;
mod entry;
mod error;
mod header;
pub mod ops;

pub use container::Container;
pub use entry::{encode_name, Entry, EntryFlag, ENTRY_SIZE, NAME_SIZE};
pub use error::{Error, Result};
pub use header::{Header, HEADER_SIZE};

/// ASCII magic tag identifying a container: `ZVFSDSK1`.
pub const MAGIC: [u8; 8] = *b"ZVFSDSK1";
/// Current on-disk format version.
pub const VERSION: u8 = 1;
/// Maximum number of entry slots in the table.
pub const FILE_CAPACITY: u16 = 32;
/// Byte offset of the entry table, immediately after the header.
pub const FILE_TABLE_OFFSET: u32 = HEADER_SIZE as u32;
/// Byte offset where the data region begins.
pub const DATA_START_OFFSET: u32 = FILE_TABLE_OFFSET + FILE_CAPACITY as u32 * ENTRY_SIZE as u32;
/// Alignment, in bytes, that every payload is padded up to.
pub const DATA_ALIGNMENT: u32 = 64;
/// Maximum length, in bytes, of a UTF-8 encoded filename (leaves room for NUL padding).
pub const MAX_NAME_LEN: usize = 31;

/// Rounds `len` up to the next multiple of [`DATA_ALIGNMENT`].
pub(crate) fn padded_len(len: u32) -> u32 {
    (len + (DATA_ALIGNMENT - 1)) / DATA_ALIGNMENT * DATA_ALIGNMENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_constants_match_spec() {
        assert_eq!(HEADER_SIZE, 64);
        assert_eq!(ENTRY_SIZE, 64);
        assert_eq!(FILE_TABLE_OFFSET, 64);
        assert_eq!(DATA_START_OFFSET, 2112);
    }

    #[test]
    fn padded_len_rounds_up_to_64() {
        assert_eq!(padded_len(0), 0);
        assert_eq!(padded_len(1), 64);
        assert_eq!(padded_len(64), 64);
        assert_eq!(padded_len(65), 128);
    }
}
