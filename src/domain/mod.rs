pub mod feed;
pub mod photo;
pub mod source;

pub use feed::{FeedDocument, FeedItem, MediaAttachment, IMAGE_MEDIUM};
pub use photo::{Gallery, PhotoRecord, PUB_DATE_FORMAT};
pub use source::Source;
