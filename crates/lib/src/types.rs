//! # Core Domain Types
//!
//! The normalized review record shared by every source, the business metadata
//! captured from aggregator pages, and the draft type adapters fill in before
//! validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The sentinel stored when a source does not report an app version.
pub const VERSION_NOT_AVAILABLE: &str = "N/A";

/// A single user review, normalized across sources.
///
/// A `Review` always carries a timestamp and a rating in `1..=5`; records that
/// cannot satisfy this are dropped by [`ReviewDraft::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub date: DateTime<Utc>,
    pub rating: u8,
    pub title: String,
    pub review: String,
    pub author: String,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    VERSION_NOT_AVAILABLE.to_string()
}

impl Review {
    /// Creates a review with an empty author and no version.
    ///
    /// Ratings outside `1..=5` are clamped into range.
    pub fn new(date: DateTime<Utc>, rating: u8, title: &str, review: &str) -> Self {
        Self {
            date,
            rating: rating.clamp(1, 5),
            title: title.to_string(),
            review: review.to_string(),
            author: String::new(),
            version: default_version(),
        }
    }

    pub fn with_author(mut self, author: &str) -> Self {
        self.author = author.to_string();
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Title and body joined by a single space, as used by every text analysis.
    pub fn full_text(&self) -> String {
        format!("{} {}", self.title, self.review)
    }
}

/// Business metadata reported by the aggregator on the first page of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessInfo {
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "trustScore")]
    pub trust_score: f64,
    #[serde(rename = "stars")]
    pub star_rating: f64,
    #[serde(rename = "totalReviews")]
    pub total_reviews: u64,
}

/// A partially decoded source record.
///
/// Adapters map upstream fields into this shape, substituting empty strings for
/// missing text fields. Only `date` and `rating` are mandatory.
#[derive(Debug, Clone, Default)]
pub struct ReviewDraft {
    pub date: Option<DateTime<Utc>>,
    pub rating: Option<i64>,
    pub title: String,
    pub review: String,
    pub author: String,
    pub version: Option<String>,
}

impl ReviewDraft {
    /// Turns the draft into a `Review`, or `None` if the date is missing or the
    /// rating is absent or outside `1..=5`.
    pub fn validate(self) -> Option<Review> {
        let date = self.date?;
        let rating = self.rating.filter(|r| (1..=5).contains(r))? as u8;
        Some(Review {
            date,
            rating,
            title: self.title,
            review: self.review,
            author: self.author,
            version: self
                .version
                .filter(|v| !v.is_empty())
                .unwrap_or_else(default_version),
        })
    }
}

/// Parses an RFC 3339 timestamp (`Z` or numeric offset) into UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_draft_without_rating_is_dropped() {
        let draft = ReviewDraft {
            date: Some(Utc::now()),
            rating: None,
            ..Default::default()
        };
        assert!(draft.validate().is_none());
    }

    #[test]
    fn test_draft_with_out_of_range_rating_is_dropped() {
        let draft = ReviewDraft {
            date: Some(Utc::now()),
            rating: Some(7),
            ..Default::default()
        };
        assert!(draft.validate().is_none());
    }

    #[test]
    fn test_draft_defaults_version() {
        let review = ReviewDraft {
            date: Some(Utc::now()),
            rating: Some(4),
            version: Some(String::new()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(review.version, VERSION_NOT_AVAILABLE);
    }

    #[test]
    fn test_parse_timestamp_with_offset() {
        let parsed = parse_timestamp("2024-01-10T10:00:00-07:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 10, 17, 0, 0).unwrap());
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
