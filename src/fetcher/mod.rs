pub mod http_fetcher;
pub mod parallel;

use async_trait::async_trait;

use crate::app::Result;

#[async_trait]
pub trait Fetcher {
    /// Retrieve the raw feed document at `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
