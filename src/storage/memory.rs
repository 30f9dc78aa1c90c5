//! In-Memory Blob Store
//!
//! HashMap-backed `BlobStore` used as the deterministic test double.
//! Supports an optional byte quota so over-quota write failures can be
//! triggered on demand.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{BlobStore, StorageError};

// == Memory Store ==
/// In-memory blob store.
///
/// Sharing one instance (behind `Arc`) between two cache constructions
/// simulates a process restart against the same backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    /// Creates an unbounded in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects any single blob larger than
    /// `quota_bytes` with `StorageError::QuotaExceeded`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            blobs: Mutex::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Returns a copy of the blob under `key`, if any. Test inspection aid.
    pub fn blob(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    /// Seeds a raw blob, bypassing the quota. Lets tests plant corrupted
    /// payloads.
    pub fn put_blob(&self, key: impl Into<String>, blob: impl Into<String>) {
        self.lock().insert(key.into(), blob.into());
    }

    /// Returns true if a blob exists under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned lock only means another test thread panicked mid-write;
        // the map itself is still usable.
        self.blobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl BlobStore for MemoryStore {
    fn load_blob(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn save_blob(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota_bytes {
            if blob.len() > quota {
                return Err(StorageError::QuotaExceeded(format!(
                    "write of {} bytes exceeds {} byte backend quota",
                    blob.len(),
                    quota
                )));
            }
        }
        self.lock().insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn remove_blob(&self, key: &str) -> Result<(), StorageError> {
        self.lock().remove(key);
        Ok(())
    }
}
