//! # Theme Clustering
//!
//! Groups reviews in a rating band around their most frequent two-word
//! phrases, picking one recent review per theme as the example. Each review is
//! used as an example at most once.

use super::lexical::LexicalProfile;
use crate::types::Review;
use serde::{Deserialize, Serialize};

const TOP_TERMS: usize = 50;
const CANDIDATES_PER_THEME: usize = 3;
const MAX_RELATED_WORDS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub phrase: String,
    pub mention_count: usize,
    pub matching_count: usize,
    pub related_words: Vec<String>,
    pub example: Review,
}

/// Clusters the reviews whose rating lies in `rating_min..=rating_max` into at
/// most `top_n` themes, in descending phrase frequency.
///
/// A review matches a phrase when its text contains either of the two words,
/// not necessarily the phrase itself.
pub fn cluster_reviews_by_theme(
    reviews: &[Review],
    rating_min: u8,
    rating_max: u8,
    top_n: usize,
) -> Vec<Theme> {
    let subset: Vec<&Review> = reviews
        .iter()
        .filter(|review| (rating_min..=rating_max).contains(&review.rating))
        .collect();
    if subset.is_empty() || top_n == 0 {
        return Vec::new();
    }

    let texts: Vec<String> = subset
        .iter()
        .map(|review| review.full_text().to_lowercase())
        .collect();
    let profile = LexicalProfile::from_texts(&texts);
    let top_words = profile.unigrams.most_common(TOP_TERMS);
    let candidates = profile.bigrams.most_common(TOP_TERMS);

    let mut used = vec![false; subset.len()];
    let mut themes = Vec::new();

    for ((first, second), mention_count) in
        candidates.into_iter().take(top_n.saturating_mul(CANDIDATES_PER_THEME))
    {
        if themes.len() >= top_n {
            break;
        }

        let matching: Vec<usize> = (0..subset.len())
            .filter(|&i| !used[i] && (texts[i].contains(&first) || texts[i].contains(&second)))
            .collect();
        let Some(example_idx) = matching
            .iter()
            .copied()
            .reduce(|best, i| if subset[i].date > subset[best].date { i } else { best })
        else {
            continue;
        };
        used[example_idx] = true;

        let example_text = &texts[example_idx];
        let related_words = top_words
            .iter()
            .map(|(word, _)| word)
            .filter(|word| **word != first && **word != second && example_text.contains(word.as_str()))
            .take(MAX_RELATED_WORDS)
            .cloned()
            .collect();

        themes.push(Theme {
            phrase: format!("{first} {second}"),
            mention_count,
            matching_count: matching.len(),
            related_words,
            example: subset[example_idx].clone(),
        });
    }

    themes
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn review(rating: u8, day: u32, text: &str) -> Review {
        let date = Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap();
        Review::new(date, rating, "", text)
    }

    #[test]
    fn test_clusters_around_most_frequent_phrase() {
        let reviews = vec![
            review(1, 10, "app crashes constantly"),
            review(1, 5, "app crashes on login"),
            review(5, 12, "love this app"),
        ];

        let themes = cluster_reviews_by_theme(&reviews, 1, 2, 3);
        let first = &themes[0];
        assert_eq!(first.phrase, "app crashes");
        assert_eq!(first.mention_count, 2);
        assert_eq!(first.matching_count, 2);
        assert_eq!(first.example.review, "app crashes constantly");
        assert_eq!(first.related_words, vec!["constantly".to_string()]);
    }

    #[test]
    fn test_examples_are_not_reused() {
        let reviews = vec![
            review(1, 10, "app crashes constantly"),
            review(1, 5, "app crashes on login"),
        ];

        let themes = cluster_reviews_by_theme(&reviews, 1, 2, 5);
        assert_eq!(themes.len(), 2);
        assert_eq!(themes[1].phrase, "crashes constantly");
        assert_eq!(themes[1].matching_count, 1);
        assert_eq!(themes[1].example.review, "app crashes on login");
    }

    #[test]
    fn test_rating_band_filters_reviews() {
        let reviews = vec![review(5, 12, "love this app"), review(4, 3, "great design")];
        assert!(cluster_reviews_by_theme(&reviews, 1, 2, 3).is_empty());
        assert!(!cluster_reviews_by_theme(&reviews, 4, 5, 3).is_empty());
    }

    #[test]
    fn test_huge_theme_count_is_bounded_by_candidates() {
        let reviews = vec![
            review(1, 10, "app crashes constantly"),
            review(2, 5, "login fails again"),
        ];
        let themes = cluster_reviews_by_theme(&reviews, 1, 2, usize::MAX);
        assert_eq!(themes.len(), 2);
    }
}
