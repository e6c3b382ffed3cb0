//! Main application entry point (HTTP service binary).
//!
//! This is a thin wrapper around the `browser_fetch` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Serving the HTTP adapter until Ctrl-C
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;

use browser_fetch::initialization::{init_logger_with, init_user_agents};
use browser_fetch::server::{start_server, AppState};
use browser_fetch::{Config, Fetcher};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let fetch_config = config.fetch_config();
    let user_agents = init_user_agents(config.user_agents.as_deref())
        .await
        .context("Failed to load User-Agent pool")?;
    let fetcher = Fetcher::new(fetch_config)
        .context("Failed to initialize fetcher")?
        .with_user_agents(user_agents);

    log::info!(
        "browser_fetch {} starting (max retries {}, request timeout {}s)",
        env!("CARGO_PKG_VERSION"),
        config.max_retries,
        config.request_timeout_seconds
    );

    start_server(&config.bind, config.port, AppState::new(fetcher)).await
}
