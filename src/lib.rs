pub mod api;
pub mod config;
pub mod core_state;
pub mod medications;
pub mod models;
pub mod pipeline;
pub mod privacy;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::{ExchangeConfig, ServerConfig};
use crate::core_state::CoreState;

pub fn run() -> anyhow::Result<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let exchange = ExchangeConfig::from_env()?;
    let server = ServerConfig::from_env()?;

    // The blocking HTTP client must be built outside the async runtime.
    let core = Arc::new(CoreState::from_config(&exchange)?);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(serve(core, server))
}

async fn serve(core: Arc<CoreState>, config: ServerConfig) -> anyhow::Result<()> {
    let server = api::start_server_on(core, config.bind_addr)
        .await
        .map_err(anyhow::Error::msg)?;

    tracing::info!(addr = %server.session.server_addr, "Dashboard API listening");

    tokio::signal::ctrl_c().await?;
    server.stop().await;
    Ok(())
}
