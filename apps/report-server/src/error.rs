//! Error types for the report server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use report_core::ReportError;
use serde::Serialize;
use thiserror::Error;

use crate::detector::DetectError;
use crate::store::StoreError;
use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request")]
    InvalidRequest,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Detection failed: {0}")]
    Detection(#[from] DetectError),

    #[error("Report generation failed: {0}")]
    Report(#[from] ReportError),

    #[error("Report generation timed out after {0}ms")]
    Timeout(u64),

    #[error("Report storage failed: {0}")]
    Store(#[from] StoreError),

    #[error("Report spooling failed: {0}")]
    Spool(#[source] std::io::Error),

    #[error("Report not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

const GENERATION_FAILED: &str = "Unable to generate report";

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ServerError::InvalidRequest => (
                StatusCode::BAD_REQUEST,
                "INVALID_REQUEST",
                self.to_string(),
            ),
            ServerError::Validation(err) => {
                (StatusCode::BAD_REQUEST, "INVALID_CONTENT", err.to_string())
            }
            ServerError::Detection(DetectError::MissingApiKey) => {
                tracing::error!("{}", self);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "DETECTOR_UNAVAILABLE",
                    "Plagiarism detection is not configured".to_string(),
                )
            }
            ServerError::Detection(_) => {
                tracing::error!("{}", self);
                (
                    StatusCode::BAD_GATEWAY,
                    "DETECTOR_ERROR",
                    "Plagiarism detection service failed".to_string(),
                )
            }
            ServerError::Report(_) | ServerError::Store(_) | ServerError::Spool(_) => {
                tracing::error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "REPORT_FAILED",
                    GENERATION_FAILED.to_string(),
                )
            }
            ServerError::Timeout(_) => {
                tracing::error!("{}", self);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "TIMEOUT",
                    GENERATION_FAILED.to_string(),
                )
            }
            ServerError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string()),
            ServerError::Internal(_) => {
                tracing::error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal error".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
