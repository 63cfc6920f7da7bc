use std::path::Path;

use crate::{Container, Result};

/// §4.3 — creates a fresh container at `path`.
///
/// The overwrite/abort decision for an existing path is a shell
/// responsibility (§6); this function always creates (or truncates) the
/// file. Callers that need the interactive prompt check `path.exists()`
/// themselves before calling, as the CLI binary does.
pub fn create(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "creating container");
    Container::create(path)?;
    tracing::debug!(path = %path.display(), size = crate::DATA_START_OFFSET, "container created");
    Ok(())
}
