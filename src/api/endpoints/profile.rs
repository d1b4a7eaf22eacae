//! Profile snapshot endpoint.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, ProfileResponse};

/// `GET /api/profile`: current profile, summary and both flow states.
pub async fn snapshot(
    State(ctx): State<ApiContext>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = ctx.core.snapshot()?;
    Ok(Json(ProfileResponse::build(&ctx.core, &profile)))
}
