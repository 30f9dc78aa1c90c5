//! Storage Backends
//!
//! Abstraction over the persistent blob store the cache round-trips through.
//!
//! The cache serializes its full entry list to a single text blob under a
//! fixed storage key. Backends only need three operations on that blob, so
//! the fault-handling logic above them (corruption recovery, quota resets)
//! can be exercised against an in-memory fake as well as the real
//! filesystem adapter.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::fmt;

use thiserror::Error;

// == Storage Error ==
/// Failures reported by a blob storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backend refused a write because it is out of space.
    #[error("storage quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Underlying I/O failure.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend cannot be reached at all.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

// == Blob Store Trait ==
/// Minimal interface to a persistent text-blob store.
///
/// A stored blob is assumed to have a single writer: nothing here
/// coordinates concurrent processes sharing one storage key, and the last
/// write wins. Callers that need multi-writer safety must layer their own
/// coordination on top.
pub trait BlobStore: fmt::Debug + Send + Sync {
    /// Reads the blob stored under `key`, or `None` if absent.
    fn load_blob(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes `blob` under `key`, replacing any previous value.
    fn save_blob(&self, key: &str, blob: &str) -> Result<(), StorageError>;

    /// Removes the blob stored under `key`. Removing an absent blob is not
    /// an error.
    fn remove_blob(&self, key: &str) -> Result<(), StorageError>;
}
