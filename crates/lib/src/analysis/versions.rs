use super::round_to;
use crate::types::{Review, VERSION_NOT_AVAILABLE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rating summary for one app version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionInsight {
    pub version: String,
    pub count: usize,
    pub avg_rating: f64,
    pub first_seen: DateTime<Utc>,
}

/// Groups reviews by app version, ignoring reviews without one, ordered by the
/// date each version was first reviewed.
pub fn version_insights(reviews: &[Review]) -> Vec<VersionInsight> {
    let mut groups: HashMap<&str, (usize, u64, DateTime<Utc>)> = HashMap::new();
    for review in reviews {
        if review.version == VERSION_NOT_AVAILABLE {
            continue;
        }
        let entry = groups
            .entry(review.version.as_str())
            .or_insert((0, 0, review.date));
        entry.0 += 1;
        entry.1 += u64::from(review.rating);
        entry.2 = entry.2.min(review.date);
    }

    let mut insights: Vec<VersionInsight> = groups
        .into_iter()
        .map(|(version, (count, sum, first_seen))| VersionInsight {
            version: version.to_string(),
            count,
            avg_rating: round_to(sum as f64 / count as f64, 2),
            first_seen,
        })
        .collect();
    insights.sort_by(|a, b| {
        a.first_seen
            .cmp(&b.first_seen)
            .then_with(|| a.version.cmp(&b.version))
    });
    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn review(day: u32, rating: u8, version: &str) -> Review {
        let date = Utc.with_ymd_and_hms(2024, 2, day, 0, 0, 0).unwrap();
        Review::new(date, rating, "t", "b").with_version(version)
    }

    #[test]
    fn test_groups_by_version_in_release_order() {
        let reviews = vec![
            review(20, 2, "2.0"),
            review(3, 5, "1.0"),
            review(25, 3, "2.0"),
            review(10, 4, "1.0"),
            review(1, 1, VERSION_NOT_AVAILABLE),
        ];

        let insights = version_insights(&reviews);
        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].version, "1.0");
        assert_eq!(insights[0].count, 2);
        assert_eq!(insights[0].avg_rating, 4.5);
        assert_eq!(insights[1].version, "2.0");
        assert_eq!(insights[1].avg_rating, 2.5);
        assert_eq!(insights[1].first_seen, Utc.with_ymd_and_hms(2024, 2, 20, 0, 0, 0).unwrap());
    }
}
