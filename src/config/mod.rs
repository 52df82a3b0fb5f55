//! Configuration management for photowall.
//!
//! Configuration is read from `~/.config/photowall/config.toml` unless a
//! path is given explicitly. If the default file doesn't exist, a default
//! configuration with comments is created.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::Source;
use crate::fetcher::http_fetcher::DEFAULT_USER_AGENT;
use crate::fetcher::parallel::{DEFAULT_TIMEOUT, DEFAULT_WORKERS};

/// Feeds polled when no configuration overrides them.
pub const DEFAULT_SOURCES: [&str; 5] = [
    "https://mastodon.social/@livelakehuron.rss",
    "https://mastodon.social/@livelakemichigan.rss",
    "https://mastodon.social/@livelakesuperior.rss",
    "https://mastodon.social/@livelakeerie.rss",
    "https://mastodon.social/@livelakeontario.rss",
];

/// Main configuration struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sources: Vec<String>,
    pub fetch: FetchConfig,
    pub page: PageConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            fetch: FetchConfig::default(),
            page: PageConfig::default(),
        }
    }
}

/// How feeds are downloaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-source timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// Maximum concurrent requests (default: 5)
    pub workers: usize,

    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            workers: DEFAULT_WORKERS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// What the generated page looks like and where it goes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,

    /// Browser auto-refresh interval in seconds; 0 disables it (default: 1800)
    pub refresh_secs: u64,

    /// Output HTML path (default: index.html)
    pub output: PathBuf,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Great Lakes Live Photos".to_string(),
            refresh_secs: 1800,
            output: PathBuf::from("index.html"),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/photowall/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("photowall").join("config.toml"))
    }

    /// Parse and check the configured sources.
    pub fn sources(&self) -> Result<Vec<Source>, ConfigError> {
        if self.sources.is_empty() {
            return Err(ConfigError::Invalid("no sources configured".to_string()));
        }

        self.sources
            .iter()
            .map(|raw| {
                Source::parse(raw).map_err(|e| ConfigError::Invalid(format!("source {}: {}", raw, e)))
            })
            .collect()
    }

    /// Reject values that would make a run meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sources()?;
        if self.fetch.workers == 0 {
            return Err(ConfigError::Invalid("fetch.workers must be at least 1".to_string()));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "fetch.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        tracing::info!("Created default config at {}", path.display());
        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# photowall configuration

# RSS feeds with Media RSS image attachments, merged newest first.
sources = [
    "https://mastodon.social/@livelakehuron.rss",
    "https://mastodon.social/@livelakemichigan.rss",
    "https://mastodon.social/@livelakesuperior.rss",
    "https://mastodon.social/@livelakeerie.rss",
    "https://mastodon.social/@livelakeontario.rss",
]

[fetch]
# Seconds before a slow source is skipped
timeout_secs = 30

# Feeds fetched at the same time
workers = 5

user_agent = "photowall/0.1.0"

[page]
title = "Great Lakes Live Photos"

# Browser auto-refresh in seconds (0 disables)
refresh_secs = 1800

# Where the HTML page is written
output = "index.html"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
