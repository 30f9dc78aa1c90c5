//! Persistence Adapter
//!
//! Round-trips the cache's entry list through a `BlobStore`, absorbing
//! every backend fault so callers of the cache never see one.

use std::sync::Arc;

use tracing::{info, warn};

use crate::cache::CacheEntry;
use crate::storage::{BlobStore, StorageError};

// == Save Outcome ==
/// Result of a best-effort persistence write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The blob was written.
    Saved,
    /// The backend refused the write as over quota; the store must run its
    /// fail-safe reset.
    QuotaExceeded,
    /// The backend failed for another reason; already logged, nothing to do.
    Failed,
}

// == Persistence Adapter ==
/// Loads and saves the serialized entry list under one fixed storage key.
#[derive(Debug)]
pub struct PersistenceAdapter {
    backend: Arc<dyn BlobStore>,
    storage_key: String,
}

impl PersistenceAdapter {
    /// Creates an adapter writing under `storage_key`.
    pub fn new(backend: Arc<dyn BlobStore>, storage_key: impl Into<String>) -> Self {
        Self {
            backend,
            storage_key: storage_key.into(),
        }
    }

    // == Load ==
    /// Reads the persisted entry list, preserving its recency order.
    ///
    /// An absent blob yields an empty list. A corrupted blob is removed
    /// from the backend and also yields an empty list; parse errors never
    /// propagate. Backend read failures are logged and treated as absent.
    pub fn load(&self) -> Vec<(String, CacheEntry)> {
        let blob = match self.backend.load_blob(&self.storage_key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(error = %err, "failed to read persisted cache, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<(String, CacheEntry)>>(&blob) {
            Ok(entries) => {
                info!(count = entries.len(), "loaded persisted cache entries");
                entries
            }
            Err(err) => {
                warn!(error = %err, "discarding corrupted cache blob");
                if let Err(err) = self.backend.remove_blob(&self.storage_key) {
                    warn!(error = %err, "failed to remove corrupted cache blob");
                }
                Vec::new()
            }
        }
    }

    // == Save ==
    /// Writes the serialized entry list.
    pub fn save(&self, serialized: &str) -> SaveOutcome {
        match self.backend.save_blob(&self.storage_key, serialized) {
            Ok(()) => SaveOutcome::Saved,
            Err(StorageError::QuotaExceeded(reason)) => {
                warn!(%reason, "backend rejected cache write as over quota");
                SaveOutcome::QuotaExceeded
            }
            Err(err) => {
                warn!(error = %err, "failed to persist cache");
                SaveOutcome::Failed
            }
        }
    }

    // == Remove ==
    /// Deletes the persisted blob, best-effort.
    pub fn remove(&self) {
        if let Err(err) = self.backend.remove_blob(&self.storage_key) {
            warn!(error = %err, "failed to remove persisted cache blob");
        }
    }
}
