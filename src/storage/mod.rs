//! Content store for generated artifacts (CSV exports).
//!
//! Artifacts are addressed by relative paths such as `csv/users_....csv`;
//! writing the same path twice overwrites the stored artifact.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("path escapes the storage root: {0}")]
    InvalidPath(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub trait ContentStore: Send + Sync {
    fn put(&self, path: &str, bytes: &[u8]) -> Result<(), StorageError>;
    fn get(&self, path: &str) -> Result<Vec<u8>, StorageError>;
    fn exists(&self, path: &str) -> bool;
}

/// Local-disk content store rooted at a fixed directory.
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path);
        let escapes = relative.components().any(|c| {
            matches!(
                c,
                std::path::Component::ParentDir | std::path::Component::RootDir
            )
        });
        if escapes {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl ContentStore for LocalStorage {
    fn put(&self, path: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(full, bytes)?;
        Ok(())
    }

    fn get(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let full = self.resolve(path)?;
        Ok(fs::read(full)?)
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.exists()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStorage::new(dir.path());

        store.put("csv/a.csv", b"one").unwrap();
        assert!(store.exists("csv/a.csv"));
        assert_eq!(store.get("csv/a.csv").unwrap(), b"one");

        store.put("csv/a.csv", b"two").unwrap();
        assert_eq!(store.get("csv/a.csv").unwrap(), b"two");
    }

    #[test]
    fn rejects_parent_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStorage::new(dir.path());
        assert!(matches!(
            store.put("../escape.csv", b"x"),
            Err(StorageError::InvalidPath(_))
        ));
    }
}
