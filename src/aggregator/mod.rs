use crate::app::{PhotowallError, Result};
use crate::domain::{Gallery, Source};
use crate::fetcher::parallel::ParallelFetcher;
use crate::parser::FeedParser;

/// Merges the photos of every configured source into one gallery.
pub struct Aggregator {
    sources: Vec<Source>,
    fetcher: ParallelFetcher,
    parser: FeedParser,
}

impl Aggregator {
    pub fn new(sources: Vec<Source>, fetcher: ParallelFetcher, parser: FeedParser) -> Self {
        Self {
            sources,
            fetcher,
            parser,
        }
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Fetch, parse and merge all sources, newest photo first.
    ///
    /// A source that fails to fetch or parse is logged and contributes
    /// nothing. Fails with [`PhotowallError::EmptyGallery`] only when no
    /// source yields a single photo.
    pub async fn aggregate(&self) -> Result<Gallery> {
        let results = self.fetcher.fetch_all(&self.sources, &self.parser).await;

        let mut photos = Vec::new();
        let mut failed = 0;

        for (source, result) in results {
            match result {
                Ok(records) => photos.extend(records),
                Err(e) if e.is_per_source() => {
                    failed += 1;
                    tracing::warn!("Skipping {}: {}", source, e);
                }
                Err(e) => {
                    failed += 1;
                    tracing::error!("Skipping {} after unexpected error: {}", source, e);
                }
            }
        }

        tracing::info!(
            "Collected {} photos from {} sources ({} failed)",
            photos.len(),
            self.sources.len(),
            failed
        );

        if photos.is_empty() {
            return Err(PhotowallError::EmptyGallery);
        }

        Ok(Gallery::from_records(photos))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::fetcher::parallel::DEFAULT_TIMEOUT;
    use crate::testing::{feed_xml, StubFetcher};

    fn aggregator(stub: StubFetcher, urls: &[&str]) -> Aggregator {
        let sources = urls.iter().map(|u| Source::parse(u).unwrap()).collect();
        Aggregator::new(
            sources,
            ParallelFetcher::with_workers(Arc::new(stub), 4, DEFAULT_TIMEOUT),
            FeedParser::new(),
        )
    }

    fn permalinks(gallery: &Gallery) -> Vec<&str> {
        gallery.iter().map(|p| p.permalink()).collect()
    }

    #[tokio::test]
    async fn test_single_source_reverse_chronological() {
        let stub = StubFetcher::new().with_feed(
            "https://lake.example.com/feed.rss",
            feed_xml(&[
                ("https://lake.example.com/t1", "Mon, 01 Jan 2024 08:00:00 +0000"),
                ("https://lake.example.com/t2", "Mon, 01 Jan 2024 09:00:00 +0000"),
                ("https://lake.example.com/t3", "Mon, 01 Jan 2024 10:00:00 +0000"),
            ]),
        );

        let gallery = aggregator(stub, &["https://lake.example.com/feed.rss"])
            .aggregate()
            .await
            .unwrap();

        assert_eq!(
            permalinks(&gallery),
            vec![
                "https://lake.example.com/t3",
                "https://lake.example.com/t2",
                "https://lake.example.com/t1",
            ]
        );
        assert_eq!(gallery.photos()[0].image_url(), "https://lake.example.com/t3.jpg");
    }

    #[tokio::test]
    async fn test_mixed_sources_ignore_completion_order() {
        // A answers last but still interleaves correctly with B.
        let stub = StubFetcher::new()
            .with_delay(
                "https://a.example.com/feed.rss",
                Duration::from_millis(80),
                feed_xml(&[
                    ("https://a.example.com/10", "Mon, 01 Jan 2024 10:00:00 +0000"),
                    ("https://a.example.com/08", "Mon, 01 Jan 2024 08:00:00 +0000"),
                ]),
            )
            .with_feed(
                "https://b.example.com/feed.rss",
                feed_xml(&[("https://b.example.com/09", "Mon, 01 Jan 2024 09:00:00 +0000")]),
            );

        let gallery = aggregator(
            stub,
            &["https://a.example.com/feed.rss", "https://b.example.com/feed.rss"],
        )
        .aggregate()
        .await
        .unwrap();

        assert_eq!(
            permalinks(&gallery),
            vec![
                "https://a.example.com/10",
                "https://b.example.com/09",
                "https://a.example.com/08",
            ]
        );
    }

    #[tokio::test]
    async fn test_ties_keep_source_then_item_order() {
        let same = "Mon, 01 Jan 2024 10:00:00 +0000";
        let stub = StubFetcher::new()
            .with_delay(
                "https://a.example.com/feed.rss",
                Duration::from_millis(50),
                feed_xml(&[("https://a.example.com/1", same), ("https://a.example.com/2", same)]),
            )
            .with_feed(
                "https://b.example.com/feed.rss",
                feed_xml(&[("https://b.example.com/1", same)]),
            );

        let gallery = aggregator(
            stub,
            &["https://a.example.com/feed.rss", "https://b.example.com/feed.rss"],
        )
        .aggregate()
        .await
        .unwrap();

        assert_eq!(
            permalinks(&gallery),
            vec![
                "https://a.example.com/1",
                "https://a.example.com/2",
                "https://b.example.com/1",
            ]
        );
    }

    #[tokio::test]
    async fn test_unparsable_timestamp_sorts_after_every_source() {
        let stub = StubFetcher::new()
            .with_feed(
                "https://a.example.com/feed.rss",
                feed_xml(&[("https://a.example.com/undated", "sometime last week")]),
            )
            .with_feed(
                "https://b.example.com/feed.rss",
                feed_xml(&[("https://b.example.com/old", "Thu, 01 Jan 1970 00:00:00 +0000")]),
            );

        let gallery = aggregator(
            stub,
            &["https://a.example.com/feed.rss", "https://b.example.com/feed.rss"],
        )
        .aggregate()
        .await
        .unwrap();

        assert_eq!(
            permalinks(&gallery),
            vec!["https://b.example.com/old", "https://a.example.com/undated"]
        );
    }

    #[tokio::test]
    async fn test_failed_sources_are_skipped() {
        // down: unexpected error, broken: feed parse error.
        let stub = StubFetcher::new()
            .with_feed("https://broken.example.com/feed.rss", "not xml at all")
            .with_feed(
                "https://ok.example.com/feed.rss",
                feed_xml(&[("https://ok.example.com/1", "Mon, 01 Jan 2024 10:00:00 +0000")]),
            );

        let gallery = aggregator(
            stub,
            &[
                "https://down.example.com/feed.rss",
                "https://broken.example.com/feed.rss",
                "https://ok.example.com/feed.rss",
            ],
        )
        .aggregate()
        .await
        .unwrap();

        assert_eq!(permalinks(&gallery), vec!["https://ok.example.com/1"]);
    }

    #[tokio::test]
    async fn test_all_sources_failing_is_empty_gallery() {
        let stub = StubFetcher::new().with_feed("https://broken.example.com/feed.rss", "<html/>");

        let result = aggregator(
            stub,
            &["https://down.example.com/feed.rss", "https://broken.example.com/feed.rss"],
        )
        .aggregate()
        .await;

        assert!(matches!(result, Err(PhotowallError::EmptyGallery)));
    }

    #[tokio::test]
    async fn test_sources_without_images_is_empty_gallery() {
        let stub = StubFetcher::new().with_feed(
            "https://text.example.com/feed.rss",
            r#"<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/"><channel><title>t</title>
<item><link>https://text.example.com/1</link><media:content url="https://text.example.com/1.mp4" medium="video"/></item>
</channel></rss>"#,
        );

        let result = aggregator(stub, &["https://text.example.com/feed.rss"])
            .aggregate()
            .await;

        assert!(matches!(result, Err(PhotowallError::EmptyGallery)));
    }

    #[tokio::test]
    async fn test_no_sources_is_empty_gallery() {
        let result = aggregator(StubFetcher::new(), &[]).aggregate().await;
        assert!(matches!(result, Err(PhotowallError::EmptyGallery)));
    }
}
