//! Dashboard API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the dashboard API router.
///
/// The dashboard is served from a different origin during development,
/// so CORS is permissive. The server binds to loopback by default.
pub fn dashboard_router(core: Arc<CoreState>) -> Router {
    let ctx = ApiContext::new(core);

    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/profile", get(endpoints::profile::snapshot))
        .route("/labs/analyze", post(endpoints::labs::analyze))
        .route("/labs/sample", get(endpoints::labs::sample))
        .route("/medications", post(endpoints::medications::add))
        .route("/medications/suggest", post(endpoints::medications::suggest))
        .route(
            "/medications/:index",
            put(endpoints::medications::edit).delete(endpoints::medications::remove),
        )
        .route("/privacy/score", post(endpoints::privacy::score))
        .with_state(ctx);

    Router::new()
        .nest("/api", api)
        .layer(CorsLayer::permissive())
}
