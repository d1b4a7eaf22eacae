//! Privacy report endpoint.

use axum::Json;
use serde::Deserialize;

use crate::privacy::{privacy_report, PrivacyReport};

#[derive(Deserialize)]
pub struct ScoreRequest {
    pub text: String,
}

/// `POST /api/privacy/score`: sensitivity score and fingerprint of lab text.
pub async fn score(Json(req): Json<ScoreRequest>) -> Json<PrivacyReport> {
    Json(privacy_report(&req.text))
}
