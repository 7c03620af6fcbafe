//! Mapping of pipeline errors onto HTTP responses

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use crate::common::errors::AnalysisError;

/// Error returned by handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Pipeline failure
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// Body could not be read as JSON (400)
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Analysis(e) => match e {
                AnalysisError::JobNotFound(_) => StatusCode::NOT_FOUND,
                e if e.is_client_error() => StatusCode::BAD_REQUEST,
                AnalysisError::QueueClosed | AnalysisError::Cancelled(_) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::Analysis(AnalysisError::ValidationFailed(errors)) => {
                json!({ "errors": errors })
            }
            ApiError::Analysis(AnalysisError::JobNotFound(_)) => {
                json!({ "error": "job not found" })
            }
            ApiError::Analysis(e) if !e.is_client_error() => {
                error!(error = %e, "request failed");
                json!({ "error": e.to_string() })
            }
            other => {
                warn!(error = %other, "request rejected");
                json!({ "error": other.to_string() })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;
