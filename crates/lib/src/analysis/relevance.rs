//! # Relevance
//!
//! Decides whether a review is about the app itself or about something else
//! the business does (billing, support, terms, physical stores), and computes
//! rating metrics with the off-topic reviews excluded.

use super::lexicon::{
    APP_RELATED_KEYWORDS, PHYSICAL_KEYWORDS, POLICY_KEYWORDS, PRICING_KEYWORDS,
    SUPPORT_KEYWORDS,
};
use super::round_to;
use crate::types::Review;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

static RELEVANCE_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-ZàèéìòùÀÈÉÌÒÙ'\-]{3,}").expect("relevance token pattern is a valid regex")
});

/// A keyword list split into single tokens and multi-word phrases.
struct KeywordSet {
    words: HashSet<&'static str>,
    phrases: Vec<&'static str>,
}

impl KeywordSet {
    fn new(entries: &'static [&'static str]) -> Self {
        let (phrases, words): (Vec<&str>, Vec<&str>) =
            entries.iter().copied().partition(|entry| entry.contains(' '));
        Self {
            words: words.into_iter().collect(),
            phrases,
        }
    }

    fn hits(&self, tokens: &HashSet<String>, lowered: &str) -> usize {
        let word_hits = tokens
            .iter()
            .filter(|token| self.words.contains(token.as_str()))
            .count();
        let phrase_hits = self
            .phrases
            .iter()
            .filter(|phrase| lowered.contains(*phrase))
            .count();
        word_hits + phrase_hits
    }
}

static CATEGORY_SETS: LazyLock<[KeywordSet; 4]> =
    LazyLock::new(|| OffTopicCategory::ALL.map(|category| KeywordSet::new(category.keywords())));

static APP_SET: LazyLock<KeywordSet> = LazyLock::new(|| KeywordSet::new(APP_RELATED_KEYWORDS));

/// Off-topic categories. Declaration order is the tie-breaking priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffTopicCategory {
    Pricing,
    Support,
    Policy,
    Physical,
}

impl OffTopicCategory {
    pub const ALL: [OffTopicCategory; 4] = [
        OffTopicCategory::Pricing,
        OffTopicCategory::Support,
        OffTopicCategory::Policy,
        OffTopicCategory::Physical,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// The lexicon entries that count as a hit for this category.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            OffTopicCategory::Pricing => PRICING_KEYWORDS,
            OffTopicCategory::Support => SUPPORT_KEYWORDS,
            OffTopicCategory::Policy => POLICY_KEYWORDS,
            OffTopicCategory::Physical => PHYSICAL_KEYWORDS,
        }
    }
}

/// Per-review keyword hit counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitCounts {
    /// Indexed by [`OffTopicCategory`] priority.
    pub categories: [usize; 4],
    pub app: usize,
}

impl HitCounts {
    pub fn off_topic_total(&self) -> usize {
        self.categories.iter().sum()
    }

    pub fn get(&self, category: OffTopicCategory) -> usize {
        self.categories[category.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relevance {
    pub is_app_related: bool,
    pub dominant: Option<OffTopicCategory>,
}

pub fn count_hits(text: &str) -> HitCounts {
    let lowered = text.to_lowercase();
    let tokens: HashSet<String> = RELEVANCE_TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect();

    let mut counts = HitCounts::default();
    for (slot, set) in counts.categories.iter_mut().zip(CATEGORY_SETS.iter()) {
        *slot = set.hits(&tokens, &lowered);
    }
    counts.app = APP_SET.hits(&tokens, &lowered);
    counts
}

/// Applies the relevance rule to a set of hit counts.
///
/// Off-topic wins only when there are no app hits at all, or when off-topic
/// hits strictly exceed one and a half times the app hits.
pub fn decide(counts: &HitCounts) -> Relevance {
    let off_topic = counts.off_topic_total();
    let app_related = Relevance {
        is_app_related: true,
        dominant: None,
    };
    if off_topic == 0 {
        return app_related;
    }
    // Integer form of off_topic > app * 1.5
    if counts.app == 0 || off_topic * 2 > counts.app * 3 {
        return Relevance {
            is_app_related: false,
            dominant: dominant_category(counts),
        };
    }
    app_related
}

fn dominant_category(counts: &HitCounts) -> Option<OffTopicCategory> {
    let mut best: Option<OffTopicCategory> = None;
    for category in OffTopicCategory::ALL {
        let hits = counts.get(category);
        if hits == 0 {
            continue;
        }
        match best {
            Some(current) if counts.get(current) >= hits => {}
            _ => best = Some(category),
        }
    }
    best
}

pub fn classify_text(text: &str) -> Relevance {
    decide(&count_hits(text))
}

pub fn classify_review(review: &Review) -> Relevance {
    classify_text(&review.full_text())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: OffTopicCategory,
    pub count: usize,
}

/// Rating metrics before and after excluding off-topic reviews.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjustedMetrics {
    pub original_count: usize,
    pub original_avg: f64,
    pub adjusted_count: usize,
    pub adjusted_avg: f64,
    pub excluded_count: usize,
    pub excluded_pct: f64,
    pub rating_delta: f64,
    pub category_breakdown: Vec<CategoryCount>,
}

fn mean_rating<'a>(reviews: impl Iterator<Item = &'a Review>) -> Option<f64> {
    let (sum, count) = reviews.fold((0u64, 0u64), |(sum, count), review| {
        (sum + u64::from(review.rating), count + 1)
    });
    (count > 0).then(|| sum as f64 / count as f64)
}

pub fn compute_adjusted_metrics(reviews: &[Review]) -> AdjustedMetrics {
    if reviews.is_empty() {
        return AdjustedMetrics::default();
    }

    let mut kept: Vec<&Review> = Vec::new();
    let mut breakdown = [0usize; 4];
    for review in reviews {
        let relevance = classify_review(review);
        if relevance.is_app_related {
            kept.push(review);
        } else if let Some(category) = relevance.dominant {
            breakdown[category.index()] += 1;
        }
    }

    let original_avg = mean_rating(reviews.iter()).unwrap_or(0.0);
    let adjusted_avg = mean_rating(kept.iter().copied());
    let excluded_count = reviews.len() - kept.len();
    let rating_delta = adjusted_avg.map_or(0.0, |adjusted| adjusted - original_avg);

    AdjustedMetrics {
        original_count: reviews.len(),
        original_avg: round_to(original_avg, 2),
        adjusted_count: kept.len(),
        adjusted_avg: round_to(adjusted_avg.unwrap_or(0.0), 2),
        excluded_count,
        excluded_pct: round_to(excluded_count as f64 * 100.0 / reviews.len() as f64, 1),
        rating_delta: round_to(rating_delta, 2),
        category_breakdown: OffTopicCategory::ALL
            .iter()
            .filter(|category| breakdown[category.index()] > 0)
            .map(|category| CategoryCount {
                category: *category,
                count: breakdown[category.index()],
            })
            .collect(),
    }
}
