use std::fmt;

use url::Url;

use crate::app::{PhotowallError, Result};

/// One configured feed locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    url: Url,
}

impl Source {
    /// Parse a feed URL. Only absolute `http` and `https` URLs are accepted.
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw.trim())?;
        match url.scheme() {
            "http" | "https" => Ok(Self { url }),
            other => Err(PhotowallError::Config(format!(
                "Unsupported scheme '{}' in source {}",
                other, raw
            ))),
        }
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
