//! API Module
//!
//! HTTP handlers and routing for the cache service REST API.
//!
//! # Endpoints
//! - `POST /key` - Derive a cache key from a payload fingerprint
//! - `PUT /entry` - Store a response
//! - `GET /entry/:key` - Look up a response
//! - `DELETE /entry/:key` - Remove one entry
//! - `DELETE /entries` - Clear the cache
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
