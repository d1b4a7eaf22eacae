//! Shared types for the dashboard API layer.

use std::sync::Arc;

use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::core_state::{CoreState, FlowError, FlowSnapshot};
use crate::models::{HealthProfile, ProfileSummary};

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }
}

/// Everything the presentation layer needs to render after any call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub profile: HealthProfile,
    pub summary: Option<ProfileSummary>,
    pub can_suggest_medications: bool,
    pub lab_flow: FlowSnapshot,
    pub med_flow: FlowSnapshot,
}

impl ProfileResponse {
    pub fn build(core: &CoreState, profile: &HealthProfile) -> Self {
        Self {
            summary: profile.summary(),
            can_suggest_medications: profile.can_suggest_medications(),
            profile: profile.clone(),
            lab_flow: core.lab_status(),
            med_flow: core.med_status(),
        }
    }
}

/// Run a flow on the blocking pool; the exchange client is synchronous.
pub async fn run_flow<F>(ctx: &ApiContext, flow: F) -> Result<Json<ProfileResponse>, ApiError>
where
    F: FnOnce(&CoreState) -> Result<Arc<HealthProfile>, FlowError> + Send + 'static,
{
    let core = Arc::clone(&ctx.core);
    let profile = tokio::task::spawn_blocking(move || flow(core.as_ref()))
        .await
        .map_err(|e| ApiError::Internal(format!("Flow task failed: {e}")))??;
    Ok(Json(ProfileResponse::build(&ctx.core, &profile)))
}
