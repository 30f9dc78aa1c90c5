//! Response DTOs for the cache service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::StatsReport;

// == Key Response ==
/// Response body for fingerprint generation (POST /key)
#[derive(Debug, Clone, Serialize)]
pub struct KeyResponse {
    /// The derived cache key
    pub key: String,
}

impl KeyResponse {
    /// Creates a new KeyResponse
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

// == Get Response ==
/// Response body for a cache lookup (GET /entry/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The cached payload
    pub data: Value,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, data: Value) -> Self {
        Self {
            key: key.into(),
            data,
        }
    }
}

// == Set Response ==
/// Response body for storing an entry (PUT /entry)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was stored
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Cached response under '{}'", key),
            key,
        }
    }
}

// == Remove Response ==
/// Response body for removing an entry (DELETE /entry/:key)
#[derive(Debug, Clone, Serialize)]
pub struct RemoveResponse {
    /// Success message
    pub message: String,
    /// The key that was removed
    pub key: String,
}

impl RemoveResponse {
    /// Creates a new RemoveResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Removed '{}'", key),
            key,
        }
    }
}

// == Clear Response ==
/// Response body for clearing the cache (DELETE /entries)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
}

impl ClearResponse {
    /// Creates a new ClearResponse
    pub fn new() -> Self {
        Self {
            message: "Cache cleared".to_string(),
        }
    }
}

impl Default for ClearResponse {
    fn default() -> Self {
        Self::new()
    }
}

// == Stats Response ==
/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Current entry count
    pub size: usize,
    /// Configured entry ceiling
    pub max_size: usize,
    /// Successful reads
    pub hits: u64,
    /// Failed reads
    pub misses: u64,
    /// hits / (hits + misses) as a fraction
    pub hit_rate: f64,
    /// Entries removed by policy
    pub evictions: u64,
    /// Estimated dollars saved by hits
    pub estimated_savings: f64,
    /// Estimated serialized size
    pub size_bytes: usize,
    /// Configured storage quota
    pub max_size_bytes: usize,
    /// Quota occupancy, 0-100
    pub percent_full: f64,
}

impl From<StatsReport> for StatsResponse {
    fn from(report: StatsReport) -> Self {
        Self {
            size: report.size,
            max_size: report.max_size,
            hits: report.hits,
            misses: report.misses,
            hit_rate: report.hit_rate,
            evictions: report.evictions,
            estimated_savings: report.estimated_savings,
            size_bytes: report.size_bytes,
            max_size_bytes: report.max_size_bytes,
            percent_full: report.percent_full,
        }
    }
}

// == Health Response ==
/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with the current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// == Error Response ==
/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
