//! File system operations
//!
//! The storage adapter: physical effects keyed by logical paths. All checks
//! and moves are synchronous `std::fs` calls; managers decide ordering so
//! metadata never outruns bytes.

use log::{error, info};
use std::fs;
use std::path::Path;

use crate::error::StorageError;

/// Storage adapter over a root directory.
pub struct DiskStorage;

impl DiskStorage {
    pub fn new() -> Self {
        Self
    }

    /// Check whether a path exists.
    pub fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    /// Recursively create a directory.
    pub fn create_dir_all(&self, path: &Path) -> Result<(), StorageError> {
        fs::create_dir_all(path).map_err(|e| {
            error!("Failed to create directory {}: {}", path.display(), e);
            StorageError::from(e)
        })
    }

    /// Move a staged file into its final location, creating the target
    /// directory if absent. Falls back to copy-and-remove when the staging
    /// area sits on another filesystem.
    pub fn move_file(&self, from: &Path, to: &Path) -> Result<(), StorageError> {
        if let Some(parent) = to.parent() {
            if !parent.exists() {
                self.create_dir_all(parent)?;
            }
        }

        match fs::rename(from, to) {
            Ok(()) => {}
            Err(_) => {
                fs::copy(from, to).map_err(|e| {
                    error!(
                        "Failed to move {} -> {}: {}",
                        from.display(),
                        to.display(),
                        e
                    );
                    StorageError::from(e)
                })?;
                let _ = fs::remove_file(from);
            }
        }

        info!("Moved {} -> {}", from.display(), to.display());
        Ok(())
    }

    /// Rename a file or directory in place. The destination must not exist.
    pub fn rename(&self, from: &Path, to: &Path) -> Result<(), StorageError> {
        if to.exists() {
            return Err(StorageError::AlreadyExists(to.to_path_buf()));
        }

        fs::rename(from, to).map_err(|e| {
            error!(
                "Failed to rename {} -> {}: {}",
                from.display(),
                to.display(),
                e
            );
            StorageError::from(e)
        })?;

        info!("Renamed {} -> {}", from.display(), to.display());
        Ok(())
    }

    /// Delete a single file. Missing files are not an error: the row is the
    /// source of truth being cleaned up behind.
    pub fn delete_file(&self, path: &Path) -> Result<(), StorageError> {
        if !path.exists() {
            return Ok(());
        }

        fs::remove_file(path).map_err(|e| {
            error!("Failed to delete file {}: {}", path.display(), e);
            StorageError::from(e)
        })?;

        info!("Deleted file {}", path.display());
        Ok(())
    }

    /// Recursively delete a directory tree. A missing tree is fine.
    pub fn delete_tree(&self, path: &Path) -> Result<(), StorageError> {
        if !path.exists() {
            return Ok(());
        }

        fs::remove_dir_all(path).map_err(|e| {
            error!("Failed to delete tree {}: {}", path.display(), e);
            StorageError::from(e)
        })?;

        info!("Deleted tree {}", path.display());
        Ok(())
    }

    /// Open a file for streaming reads.
    pub fn open_read(&self, path: &Path) -> Result<fs::File, StorageError> {
        if !path.exists() {
            return Err(StorageError::PathNotFound(path.to_path_buf()));
        }

        fs::File::open(path).map_err(|e| {
            error!("Failed to open {}: {}", path.display(), e);
            StorageError::from(e)
        })
    }
}

impl Default for DiskStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn move_creates_target_directory() {
        let dir = tempdir().unwrap();
        let staged = dir.path().join("staged.bin");
        fs::File::create(&staged)
            .unwrap()
            .write_all(b"payload")
            .unwrap();

        let storage = DiskStorage::new();
        let target = dir.path().join("1/private/reports/q1.pdf");
        storage.move_file(&staged, &target).unwrap();

        assert!(target.exists());
        assert!(!staged.exists());
    }

    #[test]
    fn rename_refuses_existing_destination() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::create_dir(&a).unwrap();
        fs::create_dir(&b).unwrap();

        let storage = DiskStorage::new();
        let err = storage.rename(&a, &b).unwrap_err();
        assert!(matches!(err, StorageError::AlreadyExists(_)));
    }

    #[test]
    fn delete_tree_is_recursive_and_idempotent() {
        let dir = tempdir().unwrap();
        let tree = dir.path().join("x/y");
        fs::create_dir_all(&tree).unwrap();
        fs::File::create(tree.join("f.txt")).unwrap();

        let storage = DiskStorage::new();
        storage.delete_tree(&dir.path().join("x")).unwrap();
        assert!(!dir.path().join("x").exists());
        // second delete is a no-op
        storage.delete_tree(&dir.path().join("x")).unwrap();
    }

    #[test]
    fn open_read_reports_missing_paths() {
        let dir = tempdir().unwrap();
        let storage = DiskStorage::new();
        let err = storage.open_read(&dir.path().join("ghost.txt")).unwrap_err();
        assert!(matches!(err, StorageError::PathNotFound(_)));
    }
}
