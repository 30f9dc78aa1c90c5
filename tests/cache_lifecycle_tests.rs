//! Cache Lifecycle Integration Tests
//!
//! End-to-end scenarios at the library level: the miss/infer/store/hit
//! cycle, restart survival, corruption recovery, and quota behavior, all
//! driven by a shared in-memory backend and a manual clock.

use std::sync::Arc;

use serde_json::json;

use semantic_cache::{generate_key, CacheSettings, ManualClock, MemoryStore, SemanticCache};

const START_MS: u64 = 1_700_000_000_000;

fn settings(storage_key: &str) -> CacheSettings {
    CacheSettings {
        storage_key: storage_key.to_string(),
        ..CacheSettings::default()
    }
}

// == Caller Workflow ==

#[test]
fn test_miss_then_store_then_hit_workflow() {
    let backend = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(START_MS));
    let mut cache = SemanticCache::new(&settings("workflow"), backend, clock);

    // The caller fingerprints its input before consulting the cache.
    let payload = "iVBORw0KGgoAAAANSUhEUg".repeat(100);
    let context = json!({"detected": ["ahu", "diffuser"]});
    let key = cache.generate_key("blueprint-analysis", &payload, Some(&context));

    // First consultation misses; the caller would now run inference.
    assert_eq!(cache.get(&key), None);

    // The inference result is cached, and the repeat lookup hits.
    let inference_result = json!({"components": 17, "confidence": 0.92});
    cache.set(key.clone(), inference_result.clone(), None);
    assert_eq!(cache.get(&key), Some(inference_result));

    let report = cache.stats_report();
    assert_eq!(report.misses, 1);
    assert_eq!(report.hits, 1);
    assert!((report.estimated_savings - 0.03).abs() < 1e-9);
}

#[test]
fn test_generate_key_free_function_matches_method() {
    let backend = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(START_MS));
    let cache = SemanticCache::new(&settings("keys"), backend, clock);

    let ctx = json!({"zone": 4});
    assert_eq!(
        cache.generate_key("estimate", "payload-bytes", Some(&ctx)),
        generate_key("estimate", "payload-bytes", Some(&ctx)),
    );
}

// == Restart Survival ==

#[test]
fn test_entries_survive_restart() {
    let backend = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(START_MS));
    let cfg = settings("restart");

    {
        let mut cache = SemanticCache::new(&cfg, backend.clone(), clock.clone());
        cache.set("analysis::a_1::no-ctx", json!({"n": 1}), None);
        cache.set("analysis::b_2::no-ctx", json!({"n": 2}), None);
    }

    let mut revived = SemanticCache::new(&cfg, backend, clock);
    assert_eq!(revived.len(), 2);
    assert_eq!(revived.get("analysis::a_1::no-ctx"), Some(json!({"n": 1})));
    assert_eq!(revived.get("analysis::b_2::no-ctx"), Some(json!({"n": 2})));
}

#[test]
fn test_stats_do_not_survive_restart() {
    let backend = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(START_MS));
    let cfg = settings("restart-stats");

    {
        let mut cache = SemanticCache::new(&cfg, backend.clone(), clock.clone());
        cache.set("k", json!(1), None);
        cache.get("k");
        cache.get("missing");
        assert_eq!(cache.stats_report().hits, 1);
    }

    let revived = SemanticCache::new(&cfg, backend, clock);
    let report = revived.stats_report();
    assert_eq!(report.hits, 0);
    assert_eq!(report.misses, 0);
    assert_eq!(report.estimated_savings, 0.0);
    // The entry itself is still there.
    assert_eq!(report.size, 1);
}

#[test]
fn test_entries_expired_during_downtime_are_swept_on_load() {
    let backend = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(START_MS));
    let cfg = settings("downtime");

    {
        let mut cache = SemanticCache::new(&cfg, backend.clone(), clock.clone());
        cache.set("ephemeral", json!(1), Some(10_000));
        cache.set("durable", json!(2), Some(120_000));
    }

    // Simulated downtime outlives the first entry's TTL.
    clock.advance(60_000);
    let cache = SemanticCache::new(&cfg, backend, clock);

    assert_eq!(cache.len(), 1);
    assert!(!cache.contains_key("ephemeral"));
    assert!(cache.contains_key("durable"));
}

// == Fault Tolerance ==

#[test]
fn test_corrupted_backend_blob_recovers_to_empty() {
    let backend = Arc::new(MemoryStore::new());
    backend.put_blob("corrupt", r#"[["half an entry", {"data": "#);
    let clock = Arc::new(ManualClock::new(START_MS));

    let cache = SemanticCache::new(&settings("corrupt"), backend.clone(), clock);

    assert!(cache.is_empty());
    // The unreadable blob was dropped from the backend as well.
    assert!(!backend.contains("corrupt"));
}

#[test]
fn test_backend_over_quota_triggers_failsafe_reset() {
    // Backend accepts nothing beyond 64 bytes; the first real entry
    // overflows it, so the store resets rather than drifting from the blob.
    let backend = Arc::new(MemoryStore::with_quota(64));
    let clock = Arc::new(ManualClock::new(START_MS));
    let mut cache = SemanticCache::new(&settings("tiny"), backend.clone(), clock);

    cache.set("k", json!("some response payload"), None);

    assert!(cache.is_empty());
    assert!(!backend.contains("tiny"));
}

// == Quota Behavior ==

#[test]
fn test_quota_pressure_trims_item_count() {
    // Quota sized so that the serialized store crosses 90% right as the
    // thirteenth entry lands, forcing a trim to 70% of capacity.
    let backend = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(START_MS));
    let cfg = CacheSettings {
        max_entries: 13,
        max_quota_bytes: 30_000,
        storage_key: "quota".to_string(),
        ..CacheSettings::default()
    };
    let mut cache = SemanticCache::new(&cfg, backend, clock.clone());

    let payload = "x".repeat(1_000);
    for i in 0..13 {
        clock.advance(1);
        cache.set(format!("key-{i}"), json!(payload), None);
    }

    assert_eq!(cache.len(), 9);
    assert!(cache.stats_report().evictions >= 4);
    // The survivors are the newest entries; age-ordered eviction dropped
    // the oldest ones.
    assert!(cache.contains_key("key-12"));
    assert!(!cache.contains_key("key-0"));
}

#[test]
fn test_quota_eviction_uses_age_order_not_recency() {
    let backend = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(START_MS));
    let cfg = CacheSettings {
        max_entries: 13,
        max_quota_bytes: 30_000,
        storage_key: "age-order".to_string(),
        ..CacheSettings::default()
    };
    let mut cache = SemanticCache::new(&cfg, backend, clock.clone());

    let payload = "x".repeat(1_000);
    for i in 0..12 {
        clock.advance(1);
        cache.set(format!("key-{i}"), json!(payload), None);
    }
    // key-0 is the oldest by creation but the most recently used.
    cache.get("key-0").unwrap();

    clock.advance(1);
    cache.set("key-12".to_string(), json!(payload), None);

    // Despite being freshly touched, key-0 went first: quota trimming
    // orders by age, not recency.
    assert!(!cache.contains_key("key-0"));
    assert!(cache.contains_key("key-12"));
    assert_eq!(cache.len(), 9);
}
