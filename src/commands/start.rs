use anyhow::Result;
use colored::Colorize;
use fuel_cost_api::{config, init_tracing_with, server};
use std::path::Path;
use tracing::info;

/// Execute the start command
///
/// Tracing is initialized here, after the configuration is loaded, so the
/// configured level and format take effect.
pub async fn execute(config_path: &Path) -> Result<()> {
    println!("{}", "Starting fuel cost API...".green());

    let cfg = config::load_config(config_path)?;
    init_tracing_with(&cfg.server.log_level, &cfg.server.log_format);

    info!(config = %config_path.display(), "Configuration loaded");

    // Blocks until shutdown
    server::start_server(cfg).await?;

    Ok(())
}
