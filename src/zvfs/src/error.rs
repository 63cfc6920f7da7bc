//! Error type shared by every container operation.

use std::io;

/// Alias for `Result<T, zvfs::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by container operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The container file, or a requested entry inside it, does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A header or entry frame did not conform to the on-disk schema.
    #[error("malformed container: {0}")]
    Malformed(String),

    /// A filename's UTF-8 encoding exceeded 31 bytes.
    #[error("name too long: {0:?} is longer than 31 bytes once UTF-8 encoded")]
    NameTooLong(String),

    /// `add` collided with an existing live or deleted entry of the same name.
    #[error("duplicate name: {0:?} already exists in the container")]
    DuplicateName(String),

    /// All 32 entry slots are occupied (live or deleted).
    #[error("no free entry slot available")]
    NoFreeSlot,

    /// `remove` targeted an entry whose flag was already set to deleted.
    #[error("{0:?} is already marked as deleted")]
    AlreadyDeleted(String),

    /// `list` found no live entries.
    #[error("container has no live files")]
    Empty,

    /// An underlying read/write on the host filesystem failed.
    #[error("host I/O error: {0}")]
    HostIo(#[from] io::Error),
}
