//! Medication endpoints: suggestion flow and manual list editing.

use axum::extract::{Path, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{run_flow, ApiContext, ProfileResponse};
use crate::medications::ManualMedicationInput;
use crate::models::Medication;

/// `POST /api/medications/suggest`: suggest from the current lab analysis.
pub async fn suggest(
    State(ctx): State<ApiContext>,
) -> Result<Json<ProfileResponse>, ApiError> {
    run_flow(&ctx, |core| core.run_med_suggestion()).await
}

/// `POST /api/medications`: append a manual entry.
pub async fn add(
    State(ctx): State<ApiContext>,
    Json(input): Json<ManualMedicationInput>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = ctx.core.add_medication(&input)?;
    Ok(Json(ProfileResponse::build(&ctx.core, &profile)))
}

/// `PUT /api/medications/:index`: replace the entry at `index`.
pub async fn edit(
    State(ctx): State<ApiContext>,
    Path(index): Path<usize>,
    Json(replacement): Json<Medication>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = ctx.core.edit_medication(index, replacement)?;
    Ok(Json(ProfileResponse::build(&ctx.core, &profile)))
}

/// `DELETE /api/medications/:index`
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(index): Path<usize>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = ctx.core.remove_medication(index)?;
    Ok(Json(ProfileResponse::build(&ctx.core, &profile)))
}
