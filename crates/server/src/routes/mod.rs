//! API route handlers
//!
//! This module contains all HTTP endpoint implementations for the aisle
//! server. Routes are organized by functionality:
//!
//! - `health`: Liveness and readiness probes
//! - `recommend`: Basket recommendation and resolve preview
//! - `stats`: Catalog and embedding-space inventory

pub mod health;
pub mod recommend;
pub mod stats;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Returns server information including version and available endpoints.
/// This is the root endpoint (GET /).
///
/// # Response
///
/// ```json
/// {
///   "name": "Aisle Server",
///   "version": "0.1.0",
///   "api_version": "v1",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Aisle Server",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
        "endpoints": [
            "/api/v1/recommend",
            "/api/v1/resolve",
            "/api/v1/stats",
            "/health",
            "/ready"
        ]
    })))
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
