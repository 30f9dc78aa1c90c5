//! Models Module
//!
//! Request and response DTOs for the cache service API.

mod requests;
mod responses;

pub use requests::{KeyRequest, SetRequest};
pub use responses::{
    ClearResponse, ErrorResponse, GetResponse, HealthResponse, KeyResponse, RemoveResponse,
    SetResponse, StatsResponse,
};
