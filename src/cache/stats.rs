//! Cache Statistics Module
//!
//! Hit/miss/eviction counters and the estimated inference-cost savings the
//! cache has produced.

use serde::Serialize;

// == Cache Stats ==
/// Process-lifetime cache counters.
///
/// Counters reset together on `clear()` and deliberately do not persist
/// across restarts; only the entries themselves round-trip through storage.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Successful reads of a fresh entry.
    pub hits: u64,
    /// Reads that found nothing servable (absent or expired).
    pub misses: u64,
    /// Entries removed by capacity or quota policy.
    pub evictions: u64,
    /// Estimated dollars saved by served hits.
    pub estimated_savings: f64,
}

impl CacheStats {
    // == Constructor ==
    /// All counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// `hits / (hits + misses)`, or 0.0 before any request.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Counts a hit and accrues the avoided inference cost.
    pub fn record_hit(&mut self, cost_per_hit: f64) {
        self.hits += 1;
        self.estimated_savings += cost_per_hit;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Reset ==
    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// == Stats Report ==
/// Point-in-time view of the cache combining the counters with size and
/// quota occupancy figures.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    /// Current entry count.
    pub size: usize,
    /// Configured entry ceiling.
    pub max_size: usize,
    /// Successful reads.
    pub hits: u64,
    /// Failed reads.
    pub misses: u64,
    /// `hits / (hits + misses)` as a 0-1 fraction.
    pub hit_rate: f64,
    /// Entries removed by policy.
    pub evictions: u64,
    /// Estimated dollars saved.
    pub estimated_savings: f64,
    /// Estimated serialized size of the store.
    pub size_bytes: usize,
    /// Configured storage quota.
    pub max_size_bytes: usize,
    /// Quota occupancy as a 0-100 percentage, one decimal.
    pub percent_full: f64,
}
