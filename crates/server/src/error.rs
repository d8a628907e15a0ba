use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use criteria::{CriteriaError, Field};
use matcher::MatchError;
use serde::{Deserialize, Serialize};
use store::StoreError;
use vivaha::SearchError;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Criteria(#[from] CriteriaError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Match(#[from] MatchError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<Field>,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Criteria(CriteriaError::Structural(_)) => StatusCode::BAD_REQUEST,
            ServerError::Criteria(CriteriaError::Field(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Match(MatchError::SeekerNotFound { .. }) | ServerError::NotFound => {
                StatusCode::NOT_FOUND
            }
            ServerError::Match(MatchError::IncompleteSeekerProfile { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ServerError::Match(MatchError::InvalidConfig(_))
            | ServerError::Store(_)
            | ServerError::Internal(_)
            | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::Criteria(CriteriaError::Structural(_)) => "STRUCTURAL_ERROR",
            ServerError::Criteria(CriteriaError::Field(_)) => "VALIDATION_ERROR",
            ServerError::Store(_) => "STORE_ERROR",
            ServerError::Match(MatchError::SeekerNotFound { .. }) => "SEEKER_NOT_FOUND",
            ServerError::Match(MatchError::IncompleteSeekerProfile { .. }) => {
                "INCOMPLETE_SEEKER_PROFILE"
            }
            ServerError::Match(MatchError::InvalidConfig(_)) | ServerError::Config(_) => {
                "CONFIG_ERROR"
            }
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }

    /// Input the client should correct, if the error points at one
    pub fn field(&self) -> Option<Field> {
        match self {
            ServerError::Criteria(err) => err.field(),
            _ => None,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: match &self {
                    // Field messages are shown to users verbatim.
                    ServerError::Criteria(CriteriaError::Field(err)) => err.message.clone(),
                    other => other.to_string(),
                },
                field: self.field(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<SearchError> for ServerError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Criteria(err) => ServerError::Criteria(err),
            SearchError::Store(err) => ServerError::Store(err),
            SearchError::Match(err) => ServerError::Match(err),
            SearchError::Config(err) => ServerError::Config(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use criteria::{FieldError, StructuralError};

    #[test]
    fn field_errors_map_to_422_with_field() {
        let err = ServerError::from(CriteriaError::from(FieldError::new(
            Field::SeekerAge,
            "Please enter your age.",
        )));
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(err.field(), Some(Field::SeekerAge));
    }

    #[test]
    fn structural_errors_map_to_400() {
        let err = ServerError::from(CriteriaError::from(StructuralError::NoModeSelected));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "STRUCTURAL_ERROR");
        assert_eq!(err.field(), None);
    }

    #[test]
    fn search_errors_keep_their_category() {
        let err = ServerError::from(SearchError::Match(MatchError::SeekerNotFound {
            serial_no: "VM-9".into(),
        }));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = ServerError::from(SearchError::Store(StoreError::backend("down")));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "STORE_ERROR");
    }
}
