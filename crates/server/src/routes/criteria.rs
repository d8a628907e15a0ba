use crate::error::ServerResult;
use crate::routes::json_body;
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use criteria::{CriteriaState, ValidatedCriteria};
use serde::Serialize;
use std::sync::Arc;

/// Form plan for a submitted criteria state
///
/// `POST /api/v1/criteria/plan` with a criteria state body returns field
/// visibility, the rasi gate and age-preference metadata.
pub async fn plan_criteria(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<CriteriaState>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let criteria = json_body(body)?;
    Ok(Json(state.pipeline.resume_form(criteria).plan()))
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub criteria: ValidatedCriteria,
}

/// Validate a criteria state
///
/// `POST /api/v1/criteria/validate` returns the normalized criteria, or the
/// first failing rule as a 422 naming the field.
pub async fn validate_criteria(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<CriteriaState>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let criteria = json_body(body)?;
    let validated = state.pipeline.validate(&criteria)?;
    Ok(Json(ValidateResponse {
        valid: true,
        criteria: validated,
    }))
}
