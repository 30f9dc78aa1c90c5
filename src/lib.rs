//! Semantic Cache - a persistent response cache for AI inference results
//!
//! Fronts expensive inference calls with a fingerprint-keyed store bounded
//! three ways: entry count (LRU eviction), entry age (TTL expiry), and
//! serialized size (storage quota). Entries survive restarts by round-
//! tripping through a pluggable blob store.

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod tasks;

pub use api::{create_router, AppState};
pub use cache::{generate_key, SemanticCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CacheSettings, Config};
pub use storage::{BlobStore, FileStore, MemoryStore};
pub use tasks::spawn_sweep_task;
