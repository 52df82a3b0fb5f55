//! Shared fixtures for unit tests.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::app::{PhotowallError, Result};
use crate::fetcher::Fetcher;

/// In-memory fetcher keyed by URL. Unknown URLs fail like a refused connection.
#[derive(Default)]
pub struct StubFetcher {
    responses: HashMap<String, (Duration, Vec<u8>)>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.with_delay(url, Duration::ZERO, body)
    }

    pub fn with_delay(mut self, url: &str, delay: Duration, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(url.to_string(), (delay, body.into()));
        self
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let (delay, body) = self
            .responses
            .get(url)
            .ok_or_else(|| PhotowallError::Other(format!("connection refused: {}", url)))?;
        if !delay.is_zero() {
            tokio::time::sleep(*delay).await;
        }
        Ok(body.clone())
    }
}

/// An RSS document with one image attachment per `(link, pubDate)` pair.
///
/// The image URL is the link with `.jpg` appended.
pub fn feed_xml(items: &[(&str, &str)]) -> String {
    let items: String = items
        .iter()
        .map(|(link, pub_date)| {
            format!(
                r#"
    <item>
      <link>{link}</link>
      <pubDate>{pub_date}</pubDate>
      <media:content url="{link}.jpg" type="image/jpeg" medium="image"/>
    </item>"#
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <title>stub</title>{items}
  </channel>
</rss>"#
    )
}
