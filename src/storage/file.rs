//! Filesystem Blob Store
//!
//! Real `BlobStore` backend persisting each storage key as a JSON file in a
//! configured directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{BlobStore, StorageError};

// == File Store ==
/// Blob store backed by one file per storage key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a file store rooted at `dir`. The directory is created
    /// lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Maps a storage key to its file path. Key characters outside
    /// `[A-Za-z0-9._-]` are replaced so keys can never escape the store
    /// directory.
    fn blob_path(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl BlobStore for FileStore {
    fn load_blob(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.blob_path(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save_blob(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.blob_path(key), blob).map_err(|err| {
            if err.kind() == ErrorKind::StorageFull {
                StorageError::QuotaExceeded(format!(
                    "filesystem out of space writing {} bytes",
                    blob.len()
                ))
            } else {
                err.into()
            }
        })
    }

    fn remove_blob(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.blob_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
