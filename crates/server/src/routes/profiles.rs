use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use matcher::RawCriteria;
use std::sync::Arc;

/// Open profile lookup
///
/// `GET /api/v1/profiles/search?serial_no=&name=&gender=&birth_date=&contact_no=`
///
/// Every parameter is optional; supplied ones are AND-ed. Parameters that
/// cannot be applied are ignored and listed in the `x-skipped-predicates`
/// response header. The body is a JSON array of matching profiles.
pub async fn search_profiles(
    State(state): State<Arc<ServerState>>,
    query: Result<Query<RawCriteria>, QueryRejection>,
) -> ServerResult<impl IntoResponse> {
    let Query(criteria) = query.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    let outcome = tokio::task::spawn_blocking(move || state.pipeline.lookup(&criteria))
        .await
        .map_err(|e| ServerError::Internal(format!("lookup task failed: {e}")))??;

    let skipped = outcome
        .report
        .skipped
        .iter()
        .map(|s| s.predicate.as_str())
        .collect::<Vec<_>>()
        .join(",");

    Ok((
        [("x-skipped-predicates", skipped)],
        Json(outcome.matches),
    ))
}
