//! Cache Entry Module
//!
//! A single cached inference response with its age and hit bookkeeping.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Cache Entry ==
/// One cached response.
///
/// Immutable after insertion except for `hit_count`, which increments on
/// each successful read. Entries serialize as part of the persisted cache
/// blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The cached response payload.
    pub data: Value,
    /// Creation timestamp (Unix milliseconds).
    pub created_at: u64,
    /// Number of times this entry has been served.
    pub hit_count: u64,
    /// Maximum age in milliseconds before the entry is stale.
    pub ttl_ms: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a fresh entry stamped at `now_ms`.
    pub fn new(data: Value, now_ms: u64, ttl_ms: u64) -> Self {
        Self {
            data,
            created_at: now_ms,
            hit_count: 0,
            ttl_ms,
        }
    }

    // == Is Expired ==
    /// Returns true once the entry's age exceeds its TTL.
    ///
    /// Boundary: at exactly `created_at + ttl_ms` the entry is still
    /// servable; it expires one millisecond later.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms > self.created_at.saturating_add(self.ttl_ms)
    }

    // == Remaining TTL ==
    /// Milliseconds until expiry, or 0 if already stale.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        self.created_at
            .saturating_add(self.ttl_ms)
            .saturating_sub(now_ms)
    }

    // == Age ==
    /// Milliseconds since the entry was created.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.created_at)
    }
}
