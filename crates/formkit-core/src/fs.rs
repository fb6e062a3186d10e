//! Filesystem helpers for replacing files in one step.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{FormError, Result};

/// Write `data` to `path` through a sibling temp file and a rename.
///
/// Readers see either the old contents or the new ones, never a partial
/// write. The parent directory must already exist.
///
/// # Errors
///
/// Returns `FormError::Storage` if the temp file cannot be created, written,
/// synced, or moved into place.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| FormError::Storage(format!("Invalid path: {}", path.display())))?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| FormError::Storage(format!("Invalid filename: {}", path.display())))?;

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| FormError::Storage(format!("System time error: {}", e)))?
        .as_nanos();
    let temp_path = parent.join(format!(".{}.{}.tmp", filename, nanos));

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .map_err(|e| FormError::Storage(format!("Temp file create failed: {}", e)))?;
    file.write_all(data)
        .and_then(|_| file.sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            FormError::Storage(format!("Temp file write failed: {}", e))
        })?;

    rename_with_fallback(&temp_path, path)
        .map_err(|e| FormError::Storage(format!("Atomic rename failed: {}", e)))
}

/// Rename a file, removing the destination first on platforms where
/// `fs::rename` refuses to replace an existing file.
///
/// If the rename ultimately fails, the temp file is cleaned up.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!("initial: {}, retry: {}", initial_err, retry_err),
            )
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_atomic_creates_and_replaces() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("forms.json");

        write_atomic(&dest, b"[]").unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "[]");

        write_atomic(&dest, b"[{}]").unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "[{}]");

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_write_atomic_missing_parent_fails() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("missing").join("forms.json");
        let err = write_atomic(&dest, b"[]").unwrap_err();
        assert!(matches!(err, FormError::Storage(_)));
    }

    #[test]
    fn test_rename_overwrites_existing() {
        let dir = tempdir().unwrap();
        let temp = dir.path().join("temp.txt");
        let dest = dir.path().join("dest.txt");

        fs::write(&dest, "old").unwrap();
        fs::write(&temp, "new").unwrap();

        rename_with_fallback(&temp, &dest).unwrap();

        assert!(!temp.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
    }
}
