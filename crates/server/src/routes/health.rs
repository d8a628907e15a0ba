use crate::state::ServerState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use std::time::SystemTime;

/// Global server start time for uptime calculation
static SERVER_START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

fn uptime_seconds() -> u64 {
    SERVER_START_TIME
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Health check endpoint (liveness)
/// Returns 200 if server is running
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "vivaha-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds(),
    }))
}

/// Readiness check endpoint
/// Returns 200 once the profile store can be read, 503 otherwise
pub async fn readiness_check(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let store = Arc::clone(state.pipeline.store());
    let listed = tokio::task::spawn_blocking(move || store.list_all().map(|p| p.len()))
        .await
        .map_err(|e| e.to_string())
        .and_then(|result| result.map_err(|e| e.to_string()));

    let (status, store_status) = match listed {
        Ok(count) => (StatusCode::OK, json!({ "status": "ready", "profiles": count })),
        Err(err) => {
            tracing::warn!(error = %err, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "status": "unavailable", "error": err }),
            )
        }
    };

    let body = Json(json!({
        "status": if status.is_success() { "ready" } else { "not_ready" },
        "service": "vivaha-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds(),
        "components": {
            "api": "ready",
            "store": store_status,
        }
    }));

    (status, body)
}
