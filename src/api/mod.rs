//! Dashboard HTTP API.
//!
//! Exposes the profile state and both analysis flows as JSON endpoints
//! for the dashboard front end. Routes are nested under `/api/`.
//!
//! The router is composable: `dashboard_router()` returns a `Router`
//! that can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::dashboard_router;
pub use server::{start_server_on, DashboardServer, ServerSession};
pub use types::ApiContext;
