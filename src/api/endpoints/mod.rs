//! API endpoint handlers.
//!
//! Each module corresponds to a dashboard panel. Handlers only translate
//! HTTP to `CoreState` calls; the flows themselves live in `core_state`.

pub mod health;
pub mod labs;
pub mod medications;
pub mod privacy;
pub mod profile;
