//! API Handlers
//!
//! HTTP request handlers for each cache service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tokio::sync::RwLock;

use crate::cache::SemanticCache;
use crate::clock::SystemClock;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, GetResponse, HealthResponse, KeyRequest, KeyResponse, RemoveResponse,
    SetRequest, SetResponse, StatsResponse,
};
use crate::storage::FileStore;

// == App State ==
/// Application state shared across all handlers.
///
/// The cache is constructed once at startup and injected everywhere; there
/// is no global instance. Mutation is serialized through the RwLock, which
/// matches the cache's single-writer design.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache instance
    pub cache: Arc<RwLock<SemanticCache>>,
}

impl AppState {
    /// Wraps an already-built cache.
    pub fn new(cache: SemanticCache) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Builds the production cache from configuration: filesystem blob
    /// store under the configured data directory, system clock.
    pub fn from_config(config: &Config) -> Self {
        let backend = Arc::new(FileStore::new(config.data_dir.clone()));
        let cache = SemanticCache::new(&config.cache, backend, Arc::new(SystemClock));
        Self::new(cache)
    }
}

// == Key Handler ==
/// Handler for POST /key
///
/// Fingerprints a payload into a cache key without storing anything.
pub async fn key_handler(
    State(state): State<AppState>,
    Json(req): Json<KeyRequest>,
) -> Result<Json<KeyResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let cache = state.cache.read().await;
    let key = cache.generate_key(&req.namespace, &req.payload, req.context.as_ref());

    Ok(Json(KeyResponse::new(key)))
}

// == Set Handler ==
/// Handler for PUT /entry
///
/// Caches a response under the given key with an optional TTL.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    cache.set(req.key.clone(), req.data, req.ttl_ms);

    Ok(Json(SetResponse::new(req.key)))
}

// == Get Handler ==
/// Handler for GET /entry/:key
///
/// Looks up a cached response. A write lock is required: a hit bumps
/// recency and hit counts, and every lookup persists.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let mut cache = state.cache.write().await;
    match cache.get(&key) {
        Some(data) => Ok(Json(GetResponse::new(key, data))),
        None => Err(CacheError::NotFound(key)),
    }
}

// == Remove Handler ==
/// Handler for DELETE /entry/:key
///
/// Removes one entry explicitly.
pub async fn remove_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<RemoveResponse>> {
    let mut cache = state.cache.write().await;
    if cache.remove(&key) {
        Ok(Json(RemoveResponse::new(key)))
    } else {
        Err(CacheError::NotFound(key))
    }
}

// == Clear Handler ==
/// Handler for DELETE /entries
///
/// Empties the cache and resets statistics.
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let mut cache = state.cache.write().await;
    cache.clear();

    Json(ClearResponse::new())
}

// == Stats Handler ==
/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::from(cache.stats_report()))
}

// == Health Handler ==
/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
