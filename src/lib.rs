//! # photowall
//!
//! Merges photo posts from several RSS feeds into one static HTML gallery.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Parser → Aggregator → Renderer
//! ```
//!
//! - [`fetcher`]: HTTP client and bounded fan-out across sources
//! - [`parser`]: RSS 2.0 + Media RSS decoding and photo extraction
//! - [`aggregator`]: per-source failure isolation, merge and sort
//! - [`render`]: maud template and atomic page write
//!
//! ## Quick Start
//!
//! ```bash
//! # Write index.html from the configured feeds
//! photowall
//!
//! # Write somewhere else, from one feed
//! photowall --out public/index.html --feed https://mastodon.social/@livelakeerie.rss
//!
//! # Keep the page fresh
//! photowall watch --interval 30m
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together fetcher,
/// aggregator and renderer from a [`Config`](config::Config).
pub mod app;

/// Configuration file (`~/.config/photowall/config.toml`).
pub mod config;

/// Command-line interface using clap.
pub mod cli;

/// Core domain models.
///
/// - [`Source`](domain::Source): one feed URL
/// - [`FeedDocument`](domain::FeedDocument), [`FeedItem`](domain::FeedItem),
///   [`MediaAttachment`](domain::MediaAttachment): parsed feed contents
/// - [`PhotoRecord`](domain::PhotoRecord), [`Gallery`](domain::Gallery):
///   what ends up on the page
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for feed fetching
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`ParallelFetcher`](fetcher::parallel::ParallelFetcher): Concurrent fetching with semaphore
pub mod fetcher;

/// RSS parsing and photo extraction.
///
/// - [`FeedParser`](parser::FeedParser): RSS 2.0 + Media RSS decoding
/// - [`extract_photos`](parser::extract_photos): Image attachments as [`PhotoRecord`](domain::PhotoRecord)s
pub mod parser;

/// Merges every source into one newest-first [`Gallery`](domain::Gallery).
pub mod aggregator;

/// HTML gallery rendering.
pub mod render;

/// Periodic regeneration (`photowall watch`).
pub mod watch;

#[cfg(test)]
pub(crate) mod testing;
