use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::{
    Entry, Error, Header, Result, DATA_START_OFFSET, ENTRY_SIZE, FILE_CAPACITY, FILE_TABLE_OFFSET,
    HEADER_SIZE,
};

/// A handle to an open container file.
///
/// Provides positional read/write of the header, the entry table, and
/// arbitrary byte ranges of the data region. Every offset is computed from
/// the constant region boundaries — `Container` never trusts a stored
/// offset without the bound checks each operation performs.
#[derive(Debug)]
pub struct Container {
    path: PathBuf,
    file: File,
}

impl Container {
    /// Creates a fresh container at `path`: a default [`Header`] followed by
    /// 32 all-zero entry slots. Truncates and overwrites any existing file —
    /// callers that need the overwrite/abort prompt of §6 must perform that
    /// check themselves before calling this (see [`crate::ops::create`]).
    pub fn create(path: impl AsRef<Path>) -> Result<Container> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;

        let mut container = Container { path, file };
        container.write_header(&Header::default())?;
        for slot in 0..FILE_CAPACITY {
            container.write_entry(slot, &Entry::default())?;
        }
        Ok(container)
    }

    /// Opens an existing container for reading and writing.
    ///
    /// Fails with `NotFound` if `path` does not exist, `Malformed` if the
    /// file is shorter than a fresh container or its magic/version do not
    /// match this crate's format.
    pub fn open(path: impl AsRef<Path>) -> Result<Container> {
        Self::open_with_mode(path, true)
    }

    /// Opens an existing container for reading only.
    ///
    /// Used by the non-mutating operations (`stat`, `list`, `extract`,
    /// `cat`) so they succeed against a write-protected container, mirroring
    /// the original's `"rb"` open mode for these operations. Fails the same
    /// way [`Container::open`] does.
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Container> {
        Self::open_with_mode(path, false)
    }

    fn open_with_mode(path: impl AsRef<Path>, write: bool) -> Result<Container> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(write)
            .open(&path)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    Error::NotFound(format!("container {}", path.display()))
                }
                _ => Error::HostIo(e),
            })?;

        let mut container = Container { path, file };
        let header = container.read_header()?;
        if !header.is_valid_format() {
            return Err(Error::Malformed(format!(
                "{} is not a zvfs container (bad magic or version)",
                container.path.display()
            )));
        }
        Ok(container)
    }

    /// The path this container was opened or created at.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the container file on the host filesystem, in bytes.
    pub fn file_size(&self) -> Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    /// Reads the 64-byte header at offset 0.
    pub fn read_header(&mut self) -> Result<Header> {
        self.file.seek(SeekFrom::Start(0))?;
        let mut bytes = [0u8; HEADER_SIZE];
        self.file.read_exact(&mut bytes)?;
        Header::from_bytes(&bytes)
    }

    /// Writes the header at offset 0.
    pub fn write_header(&mut self, header: &Header) -> Result<()> {
        self.file.seek(SeekFrom::Start(0))?;
        self.file.write_all(&header.to_bytes())?;
        Ok(())
    }

    /// Reads all 32 entry slots, in table order.
    pub fn read_entries(&mut self) -> Result<Vec<Entry>> {
        self.file.seek(SeekFrom::Start(FILE_TABLE_OFFSET as u64))?;
        let mut entries = Vec::with_capacity(FILE_CAPACITY as usize);
        let mut frame = [0u8; ENTRY_SIZE];
        for _ in 0..FILE_CAPACITY {
            self.file.read_exact(&mut frame)?;
            entries.push(Entry::from_bytes(&frame)?);
        }
        Ok(entries)
    }

    /// Writes a single entry at table slot `index`.
    pub fn write_entry(&mut self, index: u16, entry: &Entry) -> Result<()> {
        let offset = FILE_TABLE_OFFSET as u64 + index as u64 * ENTRY_SIZE as u64;
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(&entry.to_bytes())?;
        Ok(())
    }

    /// Reads `length` bytes of the data region starting at `start`.
    pub fn read_payload(&mut self, start: u32, length: u32) -> Result<Vec<u8>> {
        self.file.seek(SeekFrom::Start(start as u64))?;
        let mut buffer = vec![0u8; length as usize];
        self.file.read_exact(&mut buffer)?;
        Ok(buffer)
    }

    /// Writes `data` at `start`, followed by `padding` zero bytes.
    pub fn write_payload(&mut self, start: u32, data: &[u8], padding: u32) -> Result<()> {
        self.file.seek(SeekFrom::Start(start as u64))?;
        self.file.write_all(data)?;
        if padding > 0 {
            self.file.write_all(&vec![0u8; padding as usize])?;
        }
        Ok(())
    }

    /// Truncates the data region to `len` bytes, used by `defragment` to
    /// discard the space freed by compaction.
    pub fn truncate(&mut self, len: u64) -> Result<()> {
        self.file.set_len(len)?;
        Ok(())
    }

    /// Finds the slot index of the first empty entry, in table order.
    pub fn first_empty_slot(entries: &[Entry]) -> Option<u16> {
        entries
            .iter()
            .position(Entry::is_empty)
            .map(|index| index as u16)
    }

    /// Finds the slot index of the entry (live or deleted) whose name
    /// matches the full 32-byte padded `name`.
    pub fn find_by_name(entries: &[Entry], name: &[u8; crate::NAME_SIZE]) -> Option<u16> {
        entries
            .iter()
            .position(|entry| !entry.is_empty() && &entry.name == name)
            .map(|index| index as u16)
    }
}
