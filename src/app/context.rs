use std::sync::Arc;

use crate::aggregator::Aggregator;
use crate::app::error::{PhotowallError, Result};
use crate::config::Config;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::parallel::ParallelFetcher;
use crate::fetcher::Fetcher;
use crate::parser::FeedParser;
use crate::render::Renderer;

pub struct AppContext {
    pub config: Config,
    pub aggregator: Aggregator,
    pub renderer: Renderer,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> =
            Arc::new(HttpFetcher::new(&config.fetch.user_agent)?);
        Self::with_fetcher(config, fetcher)
    }

    /// Wire the pipeline around any [`Fetcher`].
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Result<Self> {
        config
            .validate()
            .map_err(|e| PhotowallError::Config(e.to_string()))?;
        let sources = config
            .sources()
            .map_err(|e| PhotowallError::Config(e.to_string()))?;

        let parallel_fetcher =
            ParallelFetcher::with_workers(fetcher, config.fetch.workers, config.fetch.timeout());
        let aggregator = Aggregator::new(sources, parallel_fetcher, FeedParser::new());
        let renderer = Renderer::from_config(&config.page);

        Ok(Self {
            config,
            aggregator,
            renderer,
        })
    }
}
