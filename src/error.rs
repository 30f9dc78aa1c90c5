//! Error types for the cache service
//!
//! Unified error handling for the HTTP surface using thiserror.
//!
//! The cache core itself never returns these: storage faults are absorbed
//! internally and the worst a caller sees is a miss. This type covers the
//! service layer only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Errors surfaced by the HTTP API.
#[derive(Error, Debug)]
pub enum CacheError {
    /// No fresh entry under the requested key.
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the service layer.
pub type Result<T> = std::result::Result<T, CacheError>;
