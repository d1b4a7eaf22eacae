//! Lab analysis endpoints.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::{run_flow, ApiContext, ProfileResponse};
use crate::models::SAMPLE_LAB_REPORT;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct SampleResponse {
    pub text: &'static str,
}

/// `POST /api/labs/analyze`: decode pasted lab text.
pub async fn analyze(
    State(ctx): State<ApiContext>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    run_flow(&ctx, move |core| core.run_lab_analysis(&req.text)).await
}

/// `GET /api/labs/sample`: the sample report for "Load Sample".
pub async fn sample() -> Json<SampleResponse> {
    Json(SampleResponse {
        text: SAMPLE_LAB_REPORT,
    })
}
