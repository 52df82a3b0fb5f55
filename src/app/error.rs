use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhotowallError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Timed out after {after:?} fetching {url}")]
    Timeout { url: String, after: Duration },

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("No photos found")]
    EmptyGallery,

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl PhotowallError {
    /// Expected network or feed problems confined to one source.
    ///
    /// The aggregator skips every failed source, but logs these as warnings
    /// and anything else as an error.
    pub fn is_per_source(&self) -> bool {
        matches!(
            self,
            PhotowallError::Http(_) | PhotowallError::Timeout { .. } | PhotowallError::FeedParse(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PhotowallError>;
