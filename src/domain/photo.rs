use std::cmp::Reverse;

use chrono::{DateTime, FixedOffset, Weekday};

/// RFC 1123 with a numeric zone, e.g. `Mon, 02 Jan 2006 15:04:05 -0700`,
/// after the `Www, ` day-name prefix has been removed.
///
/// The day name must be a real weekday but is not checked against the date.
pub const PUB_DATE_FORMAT: &str = "%d %b %Y %H:%M:%S %z";

/// A single image attachment lifted out of a feed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    image_url: String,
    published_at: String,
    permalink: String,
}

impl PhotoRecord {
    /// Returns `None` for a blank image URL; such attachments are dropped.
    pub fn new(
        image_url: impl Into<String>,
        published_at: impl Into<String>,
        permalink: impl Into<String>,
    ) -> Option<Self> {
        let image_url = image_url.into();
        if image_url.trim().is_empty() {
            return None;
        }
        Some(Self {
            image_url,
            published_at: published_at.into(),
            permalink: permalink.into(),
        })
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Publication timestamp exactly as the feed wrote it.
    pub fn published_at(&self) -> &str {
        &self.published_at
    }

    pub fn permalink(&self) -> &str {
        &self.permalink
    }

    /// Parsed publication time.
    ///
    /// `None` when the raw value is not `Www, ` followed by [`PUB_DATE_FORMAT`]. Galleries
    /// treat `None` as older than every parsable timestamp.
    pub fn published(&self) -> Option<DateTime<FixedOffset>> {
        let (day, rest) = self.published_at.trim().split_once(", ")?;
        if day.len() != 3 || day.parse::<Weekday>().is_err() {
            return None;
        }
        DateTime::parse_from_str(rest, PUB_DATE_FORMAT).ok()
    }
}

/// Photo records ordered newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gallery {
    photos: Vec<PhotoRecord>,
}

impl Gallery {
    /// Sort `records` by publication time, newest first.
    ///
    /// The sort is stable: equal timestamps keep their incoming order, and
    /// records without a parsable timestamp go last in incoming order.
    pub fn from_records(mut records: Vec<PhotoRecord>) -> Self {
        records.sort_by_cached_key(|photo| Reverse(photo.published()));
        Self { photos: records }
    }

    pub fn photos(&self) -> &[PhotoRecord] {
        &self.photos
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PhotoRecord> {
        self.photos.iter()
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

impl<'a> IntoIterator for &'a Gallery {
    type Item = &'a PhotoRecord;
    type IntoIter = std::slice::Iter<'a, PhotoRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.photos.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(name: &str, published_at: &str) -> PhotoRecord {
        PhotoRecord::new(
            format!("https://files.example.com/{}.jpg", name),
            published_at,
            format!("https://example.com/@lake/{}", name),
        )
        .unwrap()
    }

    fn names(gallery: &Gallery) -> Vec<&str> {
        gallery
            .iter()
            .map(|p| {
                p.image_url()
                    .trim_start_matches("https://files.example.com/")
                    .trim_end_matches(".jpg")
            })
            .collect()
    }

    #[test]
    fn test_blank_image_url_is_rejected() {
        assert!(PhotoRecord::new("", "Mon, 02 Jan 2006 15:04:05 -0700", "x").is_none());
        assert!(PhotoRecord::new("   ", "Mon, 02 Jan 2006 15:04:05 -0700", "x").is_none());
    }

    #[test]
    fn test_parses_numeric_zone() {
        let p = photo("a", "Mon, 02 Jan 2006 15:04:05 -0700");
        let parsed = p.published().unwrap();
        assert_eq!(parsed.to_rfc3339(), "2006-01-02T15:04:05-07:00");
    }

    #[test]
    fn test_weekday_is_not_checked_against_date() {
        // 1 Jan 2024 was a Monday.
        let p = photo("a", "Tue, 01 Jan 2024 10:00:00 +0000");
        assert_eq!(
            p.published().unwrap().to_rfc3339(),
            "2024-01-01T10:00:00+00:00"
        );
    }

    #[test]
    fn test_day_name_must_be_a_weekday() {
        assert!(photo("a", "Xyz, 01 Jan 2024 10:00:00 +0000").published().is_none());
        assert!(photo("a", "Monday, 01 Jan 2024 10:00:00 +0000").published().is_none());
        assert!(photo("a", "01 Jan 2024 10:00:00 +0000").published().is_none());
    }

    #[test]
    fn test_mismatched_weekday_sorts_by_instant() {
        let gallery = Gallery::from_records(vec![
            photo("older", "Mon, 01 Jan 2024 09:00:00 +0000"),
            photo("wrong-day", "Fri, 01 Jan 2024 10:00:00 +0000"),
        ]);
        assert_eq!(names(&gallery), vec!["wrong-day", "older"]);
    }

    #[test]
    fn test_unparsable_timestamp_is_none() {
        assert!(photo("a", "yesterday").published().is_none());
        assert!(photo("a", "").published().is_none());
        assert!(photo("a", "2024-01-01T00:00:00Z").published().is_none());
    }

    #[test]
    fn test_sorts_newest_first() {
        let gallery = Gallery::from_records(vec![
            photo("t1", "Mon, 01 Jan 2024 08:00:00 +0000"),
            photo("t3", "Mon, 01 Jan 2024 10:00:00 +0000"),
            photo("t2", "Mon, 01 Jan 2024 09:00:00 +0000"),
        ]);
        assert_eq!(names(&gallery), vec!["t3", "t2", "t1"]);
    }

    #[test]
    fn test_compares_instants_across_zones() {
        // 09:00 -0500 is 14:00 UTC, later than 12:00 UTC.
        let gallery = Gallery::from_records(vec![
            photo("utc", "Mon, 01 Jan 2024 12:00:00 +0000"),
            photo("est", "Mon, 01 Jan 2024 09:00:00 -0500"),
        ]);
        assert_eq!(names(&gallery), vec!["est", "utc"]);
    }

    #[test]
    fn test_equal_timestamps_keep_incoming_order() {
        let same = "Mon, 01 Jan 2024 10:00:00 +0000";
        let gallery = Gallery::from_records(vec![
            photo("first", same),
            photo("newer", "Mon, 01 Jan 2024 11:00:00 +0000"),
            photo("second", same),
            photo("third", same),
        ]);
        assert_eq!(names(&gallery), vec!["newer", "first", "second", "third"]);
    }

    #[test]
    fn test_unparsable_timestamps_sort_last() {
        let gallery = Gallery::from_records(vec![
            photo("bad1", "not a date"),
            photo("old", "Thu, 01 Jan 1970 00:00:00 +0000"),
            photo("bad2", ""),
            photo("new", "Mon, 01 Jan 2024 10:00:00 +0000"),
        ]);
        assert_eq!(names(&gallery), vec!["new", "old", "bad1", "bad2"]);
    }

    #[test]
    fn test_empty_gallery() {
        let gallery = Gallery::from_records(Vec::new());
        assert!(gallery.is_empty());
        assert_eq!(gallery.len(), 0);
    }
}
