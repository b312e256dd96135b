use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use revscope::{JobError, SourceError};
use serde_json::json;
use tracing::{error, warn};

/// A custom error type for the server application.
///
/// Each variant maps to an HTTP status code and a JSON `{"error": ...}` body.
#[derive(Debug)]
pub enum AppError {
    /// Unknown job ids and results requested too early.
    Job(JobError),
    /// A source client that could not be set up for a request.
    Source(SourceError),
    /// Request parameters that fail validation.
    BadRequest(String),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<JobError> for AppError {
    fn from(err: JobError) -> Self {
        AppError::Job(err)
    }
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        AppError::Source(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Job(err) => match err {
                JobError::NotFound => (StatusCode::NOT_FOUND, err.to_string()),
                JobError::NotReady => (StatusCode::BAD_REQUEST, err.to_string()),
            },
            AppError::Source(err) => {
                error!("SourceError: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to set up review source: {err}"),
                )
            }
            AppError::BadRequest(message) => {
                warn!("Rejected request: {message}");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
