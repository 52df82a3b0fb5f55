/// Medium classifier that marks an attachment as a photo.
pub const IMAGE_MEDIUM: &str = "image";

/// Parsed contents of one source's response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedDocument {
    pub items: Vec<FeedItem>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedItem {
    pub description: Option<String>,
    /// Raw `pubDate` text, kept unparsed until sorting.
    pub pub_date: Option<String>,
    pub link: Option<String>,
    /// Media RSS `content` elements in document order.
    pub media: Vec<MediaAttachment>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaAttachment {
    pub url: String,
    pub content_type: Option<String>,
    pub medium: Option<String>,
}

impl MediaAttachment {
    pub fn is_image(&self) -> bool {
        self.medium.as_deref() == Some(IMAGE_MEDIUM)
    }
}
