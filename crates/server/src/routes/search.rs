use crate::error::{ServerError, ServerResult};
use crate::routes::json_body;
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use criteria::CriteriaState;
use std::sync::Arc;

/// Seeker search
///
/// `POST /api/v1/search` validates the criteria state, then returns the
/// candidate profiles for the seeker as a JSON array.
pub async fn search(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<CriteriaState>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let criteria = json_body(body)?;
    let today = state.today();

    let outcome = tokio::task::spawn_blocking(move || state.pipeline.search(&criteria, today))
        .await
        .map_err(|e| ServerError::Internal(format!("search task failed: {e}")))??;

    tracing::debug!(
        seeker_age = outcome.seeker.age,
        window = ?outcome.window,
        skipped = ?outcome.skipped,
        "seeker search served"
    );

    Ok(Json(outcome.matches))
}
