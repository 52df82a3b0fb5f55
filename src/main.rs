use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use photowall::app::AppContext;
use photowall::cli::{commands, Cli, Commands};
use photowall::config::Config;
use photowall::watch::{WatchConfig, Watcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.apply(&mut config);

    let ctx = AppContext::new(config).context("Failed to set up photowall")?;

    match cli.command.unwrap_or(Commands::Generate) {
        Commands::Generate => {
            commands::generate(&ctx).await?;
        }
        Commands::Watch {
            interval,
            no_initial_update,
        } => {
            let watch_config = WatchConfig {
                interval_secs: WatchConfig::parse_interval(&interval).map_err(anyhow::Error::msg)?,
                update_on_start: !no_initial_update,
            };
            Watcher::new(Arc::new(ctx), watch_config).run().await?;
        }
    }

    Ok(())
}
