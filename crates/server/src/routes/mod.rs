//! API route handlers
//!
//! - `health`: liveness and readiness
//! - `profiles`: open profile lookup
//! - `criteria`: form plans and validation
//! - `search`: seeker search

pub mod criteria;
pub mod health;
pub mod profiles;
pub mod search;

use crate::error::{ServerError, ServerResult};
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Returns server information including version and available endpoints.
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Vivaha Search Server",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
        "endpoints": [
            "/api/v1/profiles/search",
            "/api/v1/criteria/plan",
            "/api/v1/criteria/validate",
            "/api/v1/search",
            "/health",
            "/ready"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}

/// Unwrap a JSON body, reporting malformed input in the API error format
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> ServerResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ServerError::BadRequest(rejection.body_text()))
}
