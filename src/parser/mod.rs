use rss::extension::Extension;
use rss::Channel;

use crate::app::{PhotowallError, Result};
use crate::domain::{FeedDocument, FeedItem, MediaAttachment, PhotoRecord};

/// XML namespace of the Media RSS extension.
pub const MEDIA_RSS_NAMESPACE: &str = "http://search.yahoo.com/mrss/";

#[derive(Clone)]
pub struct FeedParser;

impl Default for FeedParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedParser {
    pub fn new() -> Self {
        Self
    }

    /// Decode an RSS 2.0 document with Media RSS attachments.
    ///
    /// Only namespace declarations on the `<rss>` element are honoured. A
    /// Media RSS prefix first declared on `<channel>` or `<item>` is not
    /// recognised, and those attachments are ignored.
    pub fn parse(&self, body: &[u8]) -> Result<FeedDocument> {
        let channel =
            Channel::read_from(body).map_err(|e| PhotowallError::FeedParse(e.to_string()))?;

        // Whatever prefix the document bound to the Media RSS URI.
        let media_prefixes: Vec<&str> = channel
            .namespaces()
            .iter()
            .filter(|(_, uri)| uri.as_str() == MEDIA_RSS_NAMESPACE)
            .map(|(prefix, _)| prefix.as_str())
            .collect();

        let items = channel
            .items()
            .iter()
            .map(|item| FeedItem {
                description: item.description().map(String::from),
                pub_date: item.pub_date().map(String::from),
                link: item.link().map(String::from),
                media: media_prefixes
                    .iter()
                    .filter_map(|prefix| item.extensions().get(*prefix))
                    .filter_map(|elements| elements.get("content"))
                    .flatten()
                    .map(media_attachment)
                    .collect(),
            })
            .collect();

        Ok(FeedDocument { items })
    }
}

fn media_attachment(element: &Extension) -> MediaAttachment {
    let attrs = element.attrs();
    MediaAttachment {
        url: attrs.get("url").cloned().unwrap_or_default(),
        content_type: attrs.get("type").cloned(),
        medium: attrs.get("medium").cloned(),
    }
}

/// Project the image attachments of one item into photo records.
///
/// Each record inherits the item's link and raw `pubDate`. Attachments whose
/// medium is not exactly `image`, or whose URL is blank, yield nothing.
pub fn extract_photos(item: &FeedItem) -> Vec<PhotoRecord> {
    let published_at = item.pub_date.as_deref().unwrap_or_default();
    let permalink = item.link.as_deref().unwrap_or_default();

    item.media
        .iter()
        .filter(|media| media.is_image())
        .filter_map(|media| PhotoRecord::new(media.url.as_str(), published_at, permalink))
        .collect()
}

impl FeedDocument {
    /// All photo records in item order, then attachment order.
    pub fn photos(&self) -> Vec<PhotoRecord> {
        self.items.iter().flat_map(extract_photos).collect()
    }
}
