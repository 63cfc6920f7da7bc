use std::path::Path;

use crate::{Container, Error, Result};

/// One reported row of §4.9 — a live file's name, size, and raw creation
/// timestamp. Rendering `created` as a human-readable date is a CLI-layer
/// concern (§10); this type only carries the raw Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedFile {
    pub name: String,
    pub length: u32,
    pub created: u64,
}

/// §4.9 — lists every live entry in table order.
///
/// Fails with `Empty` if the container holds no live entries (soft-deleted
/// and empty slots don't count).
pub fn list(path: impl AsRef<Path>) -> Result<Vec<ListedFile>> {
    let path = path.as_ref();
    let mut container = Container::open_read_only(path)?;
    let entries = container.read_entries()?;

    let files = entries
        .iter()
        .filter(|entry| entry.is_live())
        .map(|entry| {
            Ok(ListedFile {
                name: entry.filename()?,
                length: entry.length,
                created: entry.created,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(path = %path.display(), count = files.len(), "listing container");

    if files.is_empty() {
        return Err(Error::Empty);
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{add, create, remove};

    fn fresh() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.zvfs");
        create(&path).unwrap();
        (dir, path)
    }

    #[test]
    fn list_reports_live_entries_in_table_order() {
        let (_dir, path) = fresh();
        add(&path, "a.txt", b"hello").unwrap();
        add(&path, "b.txt", &vec![b'x'; 70]).unwrap();

        let files = list(&path).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "a.txt");
        assert_eq!(files[0].length, 5);
        assert_eq!(files[1].name, "b.txt");
        assert_eq!(files[1].length, 70);
    }

    #[test]
    fn list_skips_deleted_entries() {
        let (_dir, path) = fresh();
        add(&path, "a.txt", b"hello").unwrap();
        add(&path, "b.txt", b"world").unwrap();
        remove(&path, "a.txt").unwrap();

        let files = list(&path).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "b.txt");
    }

    #[test]
    fn list_on_fresh_container_is_empty() {
        let (_dir, path) = fresh();
        let err = list(&path).unwrap_err();
        assert!(matches!(err, Error::Empty));
    }

    #[test]
    fn list_on_container_with_only_deleted_entries_is_empty() {
        let (_dir, path) = fresh();
        add(&path, "a.txt", b"hello").unwrap();
        remove(&path, "a.txt").unwrap();

        let err = list(&path).unwrap_err();
        assert!(matches!(err, Error::Empty));
    }

    #[test]
    fn list_reports_zero_length_file() {
        let (_dir, path) = fresh();
        add(&path, "x", b"").unwrap();
        let files = list(&path).unwrap();
        assert_eq!(files[0].length, 0);
    }
}
