//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::core_state::FlowError;

/// Structured error response body for the dashboard.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Flow busy: {0}")]
    Busy(String),
    #[error("Lab analysis required")]
    LabAnalysisRequired,
    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::BadRequest(detail) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                detail.clone(),
            ),
            ApiError::Busy(detail) => (
                StatusCode::CONFLICT,
                "FLOW_BUSY",
                detail.clone(),
            ),
            ApiError::LabAnalysisRequired => (
                StatusCode::CONFLICT,
                "LAB_ANALYSIS_REQUIRED",
                "Analyze your lab results first. Medications are suggested from your findings."
                    .to_string(),
            ),
            ApiError::AnalysisFailed(message) => (
                StatusCode::BAD_GATEWAY,
                "ANALYSIS_FAILED",
                message.clone(),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}

impl From<FlowError> for ApiError {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::EmptyInput => ApiError::BadRequest("Input text is empty".into()),
            FlowError::Busy(kind) => ApiError::Busy(format!("{kind} is already running")),
            FlowError::LabAnalysisRequired => ApiError::LabAnalysisRequired,
            e @ FlowError::Exchange { .. } => ApiError::AnalysisFailed(e.user_message()),
            FlowError::LockPoisoned => ApiError::Internal("lock poisoned".into()),
        }
    }
}
