use std::io::{self, Write};
use std::path::Path;

use crate::ops::extract;
use crate::Result;

/// §4.10 — writes the raw payload of `name` to `out` verbatim.
///
/// Shares the same lookup as [`crate::ops::extract`] (soft-deleted entries
/// included); decoding the bytes is left entirely to the caller.
pub fn cat(path: impl AsRef<Path>, name: &str, out: &mut impl Write) -> Result<()> {
    let bytes = extract(path, name)?;
    out.write_all(&bytes)?;
    Ok(())
}

/// Convenience wrapper writing to the process's standard output, as used by
/// the `catfs` CLI command.
pub fn cat_to_stdout(path: impl AsRef<Path>, name: &str) -> Result<()> {
    cat(path, name, &mut io::stdout())
}
