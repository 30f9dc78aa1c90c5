//! Request DTOs for the cache service API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

/// Longest accepted cache key, in bytes. Fingerprinted keys are far
/// shorter; this only guards against abuse of the raw API.
pub const MAX_KEY_LENGTH: usize = 512;

// == Key Request ==
/// Request body for fingerprint generation (POST /key)
///
/// # Fields
/// - `namespace`: logical grouping for the key, e.g. the analysis kind
/// - `payload`: the large input being fingerprinted (base64 image data)
/// - `context`: optional structured context folded into the key
#[derive(Debug, Clone, Deserialize)]
pub struct KeyRequest {
    /// Logical namespace for the key
    pub namespace: String,
    /// Large payload to fingerprint
    pub payload: String,
    /// Optional structured context
    #[serde(default)]
    pub context: Option<Value>,
}

impl KeyRequest {
    /// Returns an error message if the request is invalid, None otherwise.
    pub fn validate(&self) -> Option<String> {
        if self.namespace.is_empty() {
            return Some("Namespace cannot be empty".to_string());
        }
        if self.payload.is_empty() {
            return Some("Payload cannot be empty".to_string());
        }
        None
    }
}

// == Set Request ==
/// Request body for storing a response (PUT /entry)
///
/// # Fields
/// - `key`: the cache key, typically produced by POST /key
/// - `data`: the response payload to cache
/// - `ttl_ms`: optional TTL in milliseconds (default TTL if omitted)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The response payload to cache
    pub data: Value,
    /// Optional TTL in milliseconds
    #[serde(default)]
    pub ttl_ms: Option<u64>,
}

impl SetRequest {
    /// Returns an error message if the request is invalid, None otherwise.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            ));
        }
        None
    }
}
