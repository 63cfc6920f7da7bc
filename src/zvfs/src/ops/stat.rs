use std::path::{Path, PathBuf};

use crate::{Container, Result};

/// Result of §4.4 — a read-only summary of the container's header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub path: PathBuf,
    pub file_count: u16,
    pub free_slots: u16,
    pub deleted_files: u16,
    pub size_bytes: u64,
}

/// §4.4 — reads the header only and reports occupancy and host file size.
pub fn stat(path: impl AsRef<Path>) -> Result<Stat> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading container stats");
    let mut container = Container::open_read_only(path)?;
    let header = container.read_header()?;

    Ok(Stat {
        path: path.to_path_buf(),
        file_count: header.file_count,
        free_slots: header.free_slots(),
        deleted_files: header.deleted_files,
        size_bytes: container.file_size()?,
    })
}
