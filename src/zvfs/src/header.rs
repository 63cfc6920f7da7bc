use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::{Error, Result, DATA_START_OFFSET, FILE_CAPACITY, FILE_TABLE_OFFSET, MAGIC, VERSION};

/// Size, in bytes, of the on-disk header frame.
pub const HEADER_SIZE: usize = 64;

/// # Container header
///
/// The first 64 bytes of a container. Little-endian throughout.
///
/// | Offset | Size | Field             | Description |
/// | ------ | ---- | ----------------- | ----------- |
/// | 0      | 8    | magic             | ASCII tag `ZVFSDSK1`. |
/// | 8      | 1    | version           | Format version, currently 1. |
/// | 9      | 1    | flags             | Reserved, currently 0. |
/// | 10     | 2    | reserved0         | Zero. |
/// | 12     | 2    | file_count        | Number of live entries. |
/// | 14     | 2    | file_capacity     | Maximum entries, always 32. |
/// | 16     | 2    | file_entry_size   | Always 64. |
/// | 18     | 2    | reserved1         | Zero. |
/// | 20     | 4    | file_table_offset | Always 64. |
/// | 24     | 4    | data_start_offset | Always 2112. |
/// | 28     | 4    | next_free_offset  | Offset where the next added payload begins. |
/// | 32     | 4    | free_entry_offset | Advisory cursor to the first empty slot. |
/// | 36     | 2    | deleted_files     | Number of soft-deleted entries. |
/// | 38     | 26   | reserved2         | Zero. |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub magic: [u8; 8],
    pub version: u8,
    pub flags: u8,
    pub reserved0: u16,
    pub file_count: u16,
    pub file_capacity: u16,
    pub file_entry_size: u16,
    pub reserved1: u16,
    pub file_table_offset: u32,
    pub data_start_offset: u32,
    pub next_free_offset: u32,
    pub free_entry_offset: u32,
    pub deleted_files: u16,
    pub reserved2: [u8; 26],
}

impl Default for Header {
    /// A freshly `mkfs`'d header: zero files, cursors pointing at the start
    /// of the entry table and the start of the data region.
    fn default() -> Self {
        Header {
            magic: MAGIC,
            version: VERSION,
            flags: 0,
            reserved0: 0,
            file_count: 0,
            file_capacity: FILE_CAPACITY,
            file_entry_size: crate::ENTRY_SIZE as u16,
            reserved1: 0,
            file_table_offset: FILE_TABLE_OFFSET,
            data_start_offset: DATA_START_OFFSET,
            next_free_offset: DATA_START_OFFSET,
            free_entry_offset: FILE_TABLE_OFFSET,
            deleted_files: 0,
            reserved2: [0; 26],
        }
    }
}

impl Header {
    /// Decodes a header from a 64-byte little-endian frame.
    ///
    /// Does not reject an unexpected `magic`/`version`; callers that need
    /// that validation (e.g. [`crate::Container::open`]) check it explicitly
    /// so that lower-level callers can still inspect a foreign frame.
    pub fn from_bytes(bytes: &[u8]) -> Result<Header> {
        if bytes.len() != HEADER_SIZE {
            return Err(Error::Malformed(format!(
                "header frame must be {HEADER_SIZE} bytes, got {}",
                bytes.len()
            )));
        }

        let mut cursor = Cursor::new(bytes);
        let mut magic = [0u8; 8];
        cursor.read_exact(&mut magic)?;
        let version = cursor.read_u8()?;
        let flags = cursor.read_u8()?;
        let reserved0 = cursor.read_u16::<LittleEndian>()?;
        let file_count = cursor.read_u16::<LittleEndian>()?;
        let file_capacity = cursor.read_u16::<LittleEndian>()?;
        let file_entry_size = cursor.read_u16::<LittleEndian>()?;
        let reserved1 = cursor.read_u16::<LittleEndian>()?;
        let file_table_offset = cursor.read_u32::<LittleEndian>()?;
        let data_start_offset = cursor.read_u32::<LittleEndian>()?;
        let next_free_offset = cursor.read_u32::<LittleEndian>()?;
        let free_entry_offset = cursor.read_u32::<LittleEndian>()?;
        let deleted_files = cursor.read_u16::<LittleEndian>()?;
        let mut reserved2 = [0u8; 26];
        cursor.read_exact(&mut reserved2)?;

        Ok(Header {
            magic,
            version,
            flags,
            reserved0,
            file_count,
            file_capacity,
            file_entry_size,
            reserved1,
            file_table_offset,
            data_start_offset,
            next_free_offset,
            free_entry_offset,
            deleted_files,
            reserved2,
        })
    }

    /// Encodes the header into a 64-byte little-endian frame.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buffer = Vec::with_capacity(HEADER_SIZE);
        buffer.extend_from_slice(&self.magic);
        buffer.push(self.version);
        buffer.push(self.flags);
        buffer.write_u16::<LittleEndian>(self.reserved0).unwrap();
        buffer.write_u16::<LittleEndian>(self.file_count).unwrap();
        buffer
            .write_u16::<LittleEndian>(self.file_capacity)
            .unwrap();
        buffer
            .write_u16::<LittleEndian>(self.file_entry_size)
            .unwrap();
        buffer.write_u16::<LittleEndian>(self.reserved1).unwrap();
        buffer
            .write_u32::<LittleEndian>(self.file_table_offset)
            .unwrap();
        buffer
            .write_u32::<LittleEndian>(self.data_start_offset)
            .unwrap();
        buffer
            .write_u32::<LittleEndian>(self.next_free_offset)
            .unwrap();
        buffer
            .write_u32::<LittleEndian>(self.free_entry_offset)
            .unwrap();
        buffer
            .write_u16::<LittleEndian>(self.deleted_files)
            .unwrap();
        buffer.extend_from_slice(&self.reserved2);

        buffer.try_into().unwrap()
    }

    /// `true` if `magic` and `version` identify a container this crate understands.
    pub fn is_valid_format(&self) -> bool {
        self.magic == MAGIC && self.version == VERSION
    }

    /// Number of entry slots that are neither live nor soft-deleted.
    pub fn free_slots(&self) -> u16 {
        self.file_capacity - self.file_count - self.deleted_files
    }
}
