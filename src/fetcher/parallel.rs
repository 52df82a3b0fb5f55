use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::app::{PhotowallError, Result};
use crate::domain::{PhotoRecord, Source};
use crate::fetcher::Fetcher;
use crate::parser::FeedParser;

pub const DEFAULT_WORKERS: usize = 5;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome for one source, in the slot that source occupies in the configuration.
pub type SourceResult = (Source, Result<Vec<PhotoRecord>>);

pub struct ParallelFetcher {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    semaphore: Arc<Semaphore>,
    timeout: Duration,
}

impl ParallelFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self::with_workers(fetcher, DEFAULT_WORKERS, DEFAULT_TIMEOUT)
    }

    pub fn with_workers(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        workers: usize,
        timeout: Duration,
    ) -> Self {
        Self {
            fetcher,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
            timeout,
        }
    }

    /// Fetch and parse every source concurrently.
    ///
    /// Results come back in the order of `sources`, whatever order the
    /// requests complete in.
    pub async fn fetch_all(&self, sources: &[Source], parser: &FeedParser) -> Vec<SourceResult> {
        let handles: Vec<_> = sources
            .iter()
            .cloned()
            .map(|source| {
                let fetcher = self.fetcher.clone();
                let semaphore = self.semaphore.clone();
                let parser = parser.clone();
                let timeout = self.timeout;

                tokio::spawn(async move {
                    let result = match semaphore.acquire_owned().await {
                        Ok(_permit) => {
                            fetch_single_source(&fetcher, &source, &parser, timeout).await
                        }
                        Err(e) => Err(PhotowallError::Other(e.to_string())),
                    };
                    (source, result)
                })
            })
            .collect();

        join_all(handles)
            .await
            .into_iter()
            .zip(sources)
            .map(|(joined, source)| match joined {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!("Task join error for {}: {}", source, e);
                    (source.clone(), Err(PhotowallError::Other(e.to_string())))
                }
            })
            .collect()
    }
}

async fn fetch_single_source(
    fetcher: &Arc<dyn Fetcher + Send + Sync>,
    source: &Source,
    parser: &FeedParser,
    timeout: Duration,
) -> Result<Vec<PhotoRecord>> {
    let body = tokio::time::timeout(timeout, fetcher.fetch(source.url()))
        .await
        .map_err(|_| PhotowallError::Timeout {
            url: source.url().to_string(),
            after: timeout,
        })??;

    let document = parser.parse(&body)?;
    let photos = document.photos();
    tracing::info!(
        "{} items, {} photos from {}",
        document.items.len(),
        photos.len(),
        source
    );

    Ok(photos)
}
