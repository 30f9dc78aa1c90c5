//! Configuration Module
//!
//! Loads cache and server settings from environment variables with
//! sensible defaults.

use std::env;
use std::path::PathBuf;

use crate::cache::{
    DEFAULT_COST_PER_HIT, DEFAULT_MAX_ENTRIES, DEFAULT_MAX_QUOTA_BYTES, DEFAULT_STORAGE_KEY,
    DEFAULT_TTL_MS,
};

// == Cache Settings ==
/// Tunables for one cache instance.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Maximum number of entries before LRU eviction.
    pub max_entries: usize,
    /// TTL in milliseconds applied when `set` gives none.
    pub default_ttl_ms: u64,
    /// Byte budget for the persisted representation.
    pub max_quota_bytes: usize,
    /// Estimated dollars saved per cache hit.
    pub cost_per_hit: f64,
    /// Storage key the persisted blob lives under.
    pub storage_key: String,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            default_ttl_ms: DEFAULT_TTL_MS,
            max_quota_bytes: DEFAULT_MAX_QUOTA_BYTES,
            cost_per_hit: DEFAULT_COST_PER_HIT,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

// == Config ==
/// Full service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache tunables.
    pub cache: CacheSettings,
    /// Directory the filesystem blob store writes into.
    pub data_dir: PathBuf,
    /// HTTP server port.
    pub server_port: u16,
    /// Seconds between TTL sweep runs.
    pub cleanup_interval_secs: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cached entries (default: 100)
    /// - `DEFAULT_TTL_MS` - Default entry TTL in milliseconds (default: 86400000)
    /// - `MAX_QUOTA_BYTES` - Storage quota in bytes (default: 4194304)
    /// - `COST_PER_HIT` - Estimated dollars saved per hit (default: 0.03)
    /// - `STORAGE_KEY` - Persisted blob identifier (default: ai-response-cache)
    /// - `DATA_DIR` - Blob store directory (default: data)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL_SECS` - TTL sweep interval (default: 60)
    pub fn from_env() -> Self {
        let defaults = CacheSettings::default();
        Self {
            cache: CacheSettings {
                max_entries: env_parsed("MAX_ENTRIES", defaults.max_entries),
                default_ttl_ms: env_parsed("DEFAULT_TTL_MS", defaults.default_ttl_ms),
                max_quota_bytes: env_parsed("MAX_QUOTA_BYTES", defaults.max_quota_bytes),
                cost_per_hit: env_parsed("COST_PER_HIT", defaults.cost_per_hit),
                storage_key: env::var("STORAGE_KEY").unwrap_or(defaults.storage_key),
            },
            data_dir: env::var("DATA_DIR").map(PathBuf::from).unwrap_or_else(|_| "data".into()),
            server_port: env_parsed("SERVER_PORT", 3000),
            cleanup_interval_secs: env_parsed("CLEANUP_INTERVAL_SECS", 60),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheSettings::default(),
            data_dir: "data".into(),
            server_port: 3000,
            cleanup_interval_secs: 60,
        }
    }
}

/// Reads an env var and parses it, falling back to `default` when unset or
/// unparsable.
fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
