use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use pizza_manager::api::tracing::init_tracing;
use pizza_manager::api::ApiServer;
use pizza_manager::config::Config;

/// REST backend managing pizzas and their toppings
#[derive(Parser)]
#[command(name = "pizza-manager")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the config file (default: platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listen address (host:port)
    #[arg(short, long)]
    bind: Option<String>,

    /// Override the log filter when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load().context("failed to load config")?,
    };
    apply_overrides(&mut config, cli);
    config.validate().context("invalid configuration")?;

    init_tracing(&config.logging.level);

    let mut server = ApiServer::new(&config)?;
    let addr = server.try_bind().await?;
    tracing::info!(%addr, "Pizza manager ready");

    server.run().await?;
    Ok(())
}

fn apply_overrides(config: &mut Config, cli: Cli) {
    if let Some(bind) = cli.bind {
        config.server.bind_addr = bind;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
}
