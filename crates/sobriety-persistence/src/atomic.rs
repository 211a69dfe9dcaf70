//! Crash-safe file writes.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::error::{PersistenceError, Result};

/// Replaces the contents of `path` with `data` atomically.
///
/// The data goes to a temporary file in the same directory, is synced, and
/// is then renamed over the target. Readers see either the old contents or
/// the new ones, never a partial write. Missing parent directories are
/// created.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(dir).map_err(|source| PersistenceError::DirectoryError {
        path: dir.to_path_buf(),
        source,
    })?;

    let write_error = |source: std::io::Error| PersistenceError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    let mut temp_file = tempfile::NamedTempFile::new_in(dir).map_err(write_error)?;
    temp_file.write_all(data).map_err(write_error)?;
    temp_file.as_file().sync_all().map_err(write_error)?;
    temp_file
        .persist(path)
        .map_err(|e| write_error(e.error))?;

    Ok(())
}

/// Reads a UTF-8 file, returning `None` if it does not exist.
pub fn read_text_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(PersistenceError::ReadError {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("start_date.txt");

        atomic_write(&path, b"2025-09-01").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "2025-09-01");
    }

    #[test]
    fn test_atomic_write_replaces_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("start_date.txt");

        atomic_write(&path, b"2025-09-01 and a long tail").unwrap();
        atomic_write(&path, b"2025-10-01").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "2025-10-01");
        // Only the target remains; the temp file was renamed away.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/state/start_date.txt");

        atomic_write(&path, b"2025-09-01").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_read_text_optional_missing() {
        let dir = tempdir().unwrap();
        let result = read_text_optional(&dir.path().join("missing.txt")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_read_text_optional_directory_is_error() {
        let dir = tempdir().unwrap();
        let result = read_text_optional(dir.path());
        assert!(matches!(result, Err(PersistenceError::ReadError { .. })));
    }
}
