//! Cache Store Module
//!
//! The semantic cache aggregate: HashMap storage with recency tracking,
//! TTL expiration, LRU capacity eviction, quota-driven trimming, and
//! best-effort persistence after every mutation.

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::{
    generate_key, CacheEntry, CacheStats, PersistenceAdapter, QuotaManager, RecencyList,
    SaveOutcome, StatsReport, QUOTA_PRESSURE_THRESHOLD, QUOTA_TRIM_RATIO, WRITE_ABORT_TRIM_RATIO,
};
use crate::clock::Clock;
use crate::config::CacheSettings;
use crate::storage::BlobStore;

// == Semantic Cache ==
/// Persistent response cache keyed by payload fingerprints.
///
/// Construction loads whatever survived in the backend and sweeps expired
/// entries. Every mutating operation writes the full entry list back,
/// least-recently-used first, so both membership and recency survive a
/// restart. Statistics do not persist; they describe the current process
/// only.
#[derive(Debug)]
pub struct SemanticCache {
    /// Key-value storage.
    entries: HashMap<String, CacheEntry>,
    /// Access order, least recently used first.
    recency: RecencyList,
    /// Process-lifetime counters.
    stats: CacheStats,
    /// Maximum number of entries.
    max_entries: usize,
    /// TTL applied when `set` is called without one.
    default_ttl_ms: u64,
    /// Dollars accrued to `estimated_savings` per hit.
    cost_per_hit: f64,
    /// Storage budget accounting.
    quota: QuotaManager,
    /// Round trip to the persistent backend.
    persistence: PersistenceAdapter,
    /// Injected time source.
    clock: Arc<dyn Clock>,
}

impl SemanticCache {
    // == Constructor ==
    /// Builds a cache over `backend`, restoring persisted entries and
    /// sweeping any that expired while the process was down.
    pub fn new(
        settings: &CacheSettings,
        backend: Arc<dyn BlobStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let persistence = PersistenceAdapter::new(backend, settings.storage_key.clone());
        let mut cache = Self {
            entries: HashMap::new(),
            recency: RecencyList::new(),
            stats: CacheStats::new(),
            max_entries: settings.max_entries,
            default_ttl_ms: settings.default_ttl_ms,
            cost_per_hit: settings.cost_per_hit,
            quota: QuotaManager::new(settings.max_quota_bytes),
            persistence,
            clock,
        };

        for (key, entry) in cache.persistence.load() {
            cache.recency.touch(&key);
            cache.entries.insert(key, entry);
        }
        cache.cleanup_expired();
        cache
    }

    // == Key Generation ==
    /// Fingerprints a payload into a cache key. See [`generate_key`].
    pub fn generate_key(&self, namespace: &str, payload: &str, context: Option<&Value>) -> String {
        generate_key(namespace, payload, context)
    }

    // == Get ==
    /// Looks up a cached response.
    ///
    /// A fresh entry counts a hit, accrues savings, bumps the entry's hit
    /// count and moves it to most-recently-used. An expired entry is
    /// removed and counts a miss, as does an absent key. Every lookup
    /// writes the store back so recency stays durable across restarts.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                self.stats.record_miss();
                self.persist();
                return None;
            }
        };

        if expired {
            debug!(%key, "removing expired entry on access");
            self.entries.remove(key);
            self.recency.remove(key);
            self.stats.record_miss();
            self.persist();
            return None;
        }

        let data = self.entries.get_mut(key).map(|entry| {
            entry.hit_count += 1;
            entry.data.clone()
        })?;
        self.stats.record_hit(self.cost_per_hit);
        self.recency.touch(key);
        debug!(
            %key,
            total_saved = self.stats.estimated_savings,
            "cache hit"
        );
        self.persist();
        Some(data)
    }

    /// Typed variant of [`get`](Self::get).
    pub fn get_as<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        self.get(key)
            .and_then(|value| serde_json::from_value(value).ok())
    }

    // == Set ==
    /// Stores a response under `key`.
    ///
    /// At capacity the least recently used entry is evicted first. The new
    /// entry lands at the most-recently-used position with a fresh
    /// timestamp; storing an existing key replaces it and resets its
    /// recency. The store is persisted and then checked against the
    /// storage quota.
    pub fn set(&mut self, key: impl Into<String>, data: Value, ttl_ms: Option<u64>) {
        let key = key.into();

        if self.entries.len() >= self.max_entries {
            if let Some(victim) = self.recency.pop_lru() {
                self.entries.remove(&victim);
                self.stats.record_eviction();
                debug!(key = %victim, "evicted least recently used entry at capacity");
            }
        }

        let entry = CacheEntry::new(
            data,
            self.clock.now_ms(),
            ttl_ms.unwrap_or(self.default_ttl_ms),
        );
        self.recency.touch(&key);
        self.entries.insert(key, entry);

        self.persist();
        self.enforce_quota();
    }

    /// Typed variant of [`set`](Self::set).
    pub fn set_as<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        data: &T,
        ttl_ms: Option<u64>,
    ) -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(data)?;
        self.set(key, value, ttl_ms);
        Ok(())
    }

    // == Remove ==
    /// Explicitly removes one entry. Returns whether it existed. Not an
    /// eviction: the counter is untouched.
    pub fn remove(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.recency.remove(key);
            self.persist();
            true
        } else {
            false
        }
    }

    // == Contains ==
    /// Returns true if `key` holds a fresh entry. Does not touch recency
    /// or statistics.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .map(|entry| !entry.is_expired(self.clock.now_ms()))
            .unwrap_or(false)
    }

    // == Clear ==
    /// Empties the store, zeroes the statistics, and persists the empty
    /// state.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
        self.stats.reset();
        self.persist();
        info!("cleared semantic cache");
    }

    // == TTL Sweep ==
    /// Removes every expired entry, regardless of recency. Runs at
    /// construction and from the periodic cleanup task. Returns the number
    /// removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired.len();
        for key in &expired {
            self.entries.remove(key);
            self.recency.remove(key);
        }

        if count > 0 {
            info!(count, "swept expired cache entries");
            self.persist();
        }
        count
    }

    // == Stats ==
    /// Point-in-time statistics including quota occupancy.
    pub fn stats_report(&self) -> StatsReport {
        let size_bytes = self
            .serialize_entries()
            .map(|s| self.quota.estimate_size_bytes(&s))
            .unwrap_or(0);

        StatsReport {
            size: self.entries.len(),
            max_size: self.max_entries,
            hits: self.stats.hits,
            misses: self.stats.misses,
            hit_rate: self.stats.hit_rate(),
            evictions: self.stats.evictions,
            estimated_savings: self.stats.estimated_savings,
            size_bytes,
            max_size_bytes: self.quota.max_bytes(),
            percent_full: self.quota.percent_full(size_bytes),
        }
    }

    // == Length ==
    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Internals ==
    /// Serializes the entry list in recency order, least recent first.
    fn serialize_entries(&self) -> Option<String> {
        let snapshot: Vec<(&String, &CacheEntry)> = self
            .recency
            .iter()
            .filter_map(|key| self.entries.get(key).map(|entry| (key, entry)))
            .collect();

        match serde_json::to_string(&snapshot) {
            Ok(serialized) => Some(serialized),
            Err(err) => {
                warn!(error = %err, "failed to serialize cache entries");
                None
            }
        }
    }

    /// Best-effort write-back of the full store.
    ///
    /// If the pending serialization would itself exceed the quota, the
    /// store is trimmed to half capacity and this particular write is
    /// skipped; the next mutation persists the smaller store. If the
    /// backend reports it is out of space anyway, the in-memory store and
    /// the backend blob are both dropped so the two cannot drift apart.
    fn persist(&mut self) {
        let Some(serialized) = self.serialize_entries() else {
            return;
        };

        let size_bytes = self.quota.estimate_size_bytes(&serialized);
        if self.quota.exceeds(size_bytes) {
            warn!(
                size_bytes,
                quota = self.quota.max_bytes(),
                "pending cache write exceeds storage quota, trimming and skipping write"
            );
            let target = (self.max_entries as f64 * WRITE_ABORT_TRIM_RATIO) as usize;
            self.evict_oldest_to(target);
            return;
        }

        match self.persistence.save(&serialized) {
            SaveOutcome::Saved | SaveOutcome::Failed => {}
            SaveOutcome::QuotaExceeded => {
                warn!("backend over quota, resetting cache to match removed blob");
                self.entries.clear();
                self.recency.clear();
                self.persistence.remove();
            }
        }
    }

    /// Trims toward 70% of capacity once the serialized store crosses 90%
    /// of the quota. Runs after every `set`.
    fn enforce_quota(&mut self) {
        let Some(serialized) = self.serialize_entries() else {
            return;
        };

        let size_bytes = self.quota.estimate_size_bytes(&serialized);
        if self.quota.fraction_full(size_bytes) >= QUOTA_PRESSURE_THRESHOLD {
            warn!(
                percent_full = self.quota.percent_full(size_bytes),
                "cache storage nearly full, trimming oldest entries"
            );
            let target = (self.max_entries as f64 * QUOTA_TRIM_RATIO) as usize;
            let evicted = self.evict_oldest_to(target);
            if evicted > 0 {
                info!(evicted, "trimmed cache under quota pressure");
                self.persist();
            }
        }
    }

    /// Removes oldest-created entries (age order, not recency order) until
    /// at most `target` remain. Returns how many were removed.
    fn evict_oldest_to(&mut self, target: usize) -> usize {
        let mut by_age: Vec<(String, u64)> = self
            .entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.created_at))
            .collect();
        by_age.sort_by_key(|(_, created_at)| *created_at);

        let mut evicted = 0;
        for (key, _) in by_age {
            if self.entries.len() <= target {
                break;
            }
            self.entries.remove(&key);
            self.recency.remove(&key);
            self.stats.record_eviction();
            evicted += 1;
        }
        evicted
    }
}
