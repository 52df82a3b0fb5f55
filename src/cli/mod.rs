pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "photowall")]
#[command(about = "Merge photo feeds into a static HTML gallery", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/photowall/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output HTML file path
    #[arg(short, long, global = true)]
    pub out: Option<PathBuf>,

    /// Number of parallel workers for fetching feeds
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    /// Per-feed fetch timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Feed URL to use instead of the configured sources (repeatable)
    #[arg(long = "feed", value_name = "URL", global = true)]
    pub feeds: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch all feeds and write the gallery once (default)
    Generate,
    /// Regenerate the gallery on an interval until interrupted
    Watch {
        /// Regeneration interval (e.g., "30m", "1h", "1d")
        #[arg(short, long, default_value = "30m")]
        interval: String,

        /// Skip the initial generation on start
        #[arg(long)]
        no_initial_update: bool,
    },
}

impl Cli {
    /// Layer command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(out) = &self.out {
            config.page.output = out.clone();
        }
        if let Some(workers) = self.workers {
            config.fetch.workers = workers;
        }
        if let Some(timeout) = self.timeout {
            config.fetch.timeout_secs = timeout;
        }
        if !self.feeds.is_empty() {
            config.sources = self.feeds.clone();
        }
    }
}
