//! # Analysis
//!
//! Deterministic, rule-based analytics over collected reviews: keyword and
//! phrase frequencies, lexicon sentiment, theme clustering, version insights,
//! and relevance-adjusted rating metrics.

pub mod lexical;
pub mod lexicon;
pub mod relevance;
pub mod sentiment;
pub mod themes;
pub mod versions;

pub use lexical::{content_tokens, extract_bigrams, extract_keywords, tokenize, LexicalProfile};
pub use relevance::{
    classify_review, classify_text, compute_adjusted_metrics, decide, AdjustedMetrics,
    CategoryCount, HitCounts, OffTopicCategory, Relevance,
};
pub use sentiment::{compute_sentiment, score_tokens, SentimentLabel, SentimentReport};
pub use themes::{cluster_reviews_by_theme, Theme};
pub use versions::{version_insights, VersionInsight};

/// Rounds half away from zero to `decimals` places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
