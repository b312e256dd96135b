//! # Product Comparison
//!
//! Collects reviews for several products one after another with the blocking
//! paginator and reduces each collection to a side-by-side report.

use crate::analysis::{
    cluster_reviews_by_theme, compute_adjusted_metrics, compute_sentiment, round_to,
    AdjustedMetrics, SentimentReport, Theme,
};
use crate::errors::SourceError;
use crate::fetch::{collect_all, FetchRequest, StopReason};
use crate::source::ReviewSource;
use crate::types::Review;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

const THEMES_PER_REPORT: usize = 5;

/// Builds sources for products of one kind and resolves their display names.
#[async_trait]
pub trait SourceFactory: Send + Sync {
    fn source_for(&self, product_id: &str) -> Result<Arc<dyn ReviewSource>, SourceError>;

    /// Best-effort display name; implementations fall back to something
    /// derived from the id rather than failing.
    async fn display_name(&self, product_id: &str) -> String;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductReport {
    pub product_id: String,
    pub name: String,
    pub total: usize,
    pub avg_rating: f64,
    pub positive_pct: f64,
    pub negative_pct: f64,
    /// Review counts for 1 through 5 stars.
    pub rating_distribution: [usize; 5],
    pub sentiment: SentimentReport,
    pub adjusted: AdjustedMetrics,
    pub problem_themes: Vec<Theme>,
    pub win_themes: Vec<Theme>,
    pub stop_reason: StopReason,
}

impl ProductReport {
    /// Summarizes an already collected set of reviews.
    pub fn from_reviews(product_id: &str, name: String, reviews: &[Review]) -> Self {
        let total = reviews.len();
        let mut rating_distribution = [0usize; 5];
        for review in reviews {
            if (1..=5).contains(&review.rating) {
                rating_distribution[usize::from(review.rating) - 1] += 1;
            }
        }
        let share = |count: usize| {
            if total == 0 {
                0.0
            } else {
                round_to(count as f64 * 100.0 / total as f64, 1)
            }
        };
        let rating_sum: usize = reviews.iter().map(|r| usize::from(r.rating)).sum();
        let texts: Vec<String> = reviews.iter().map(Review::full_text).collect();

        Self {
            product_id: product_id.to_string(),
            name,
            total,
            avg_rating: if total == 0 {
                0.0
            } else {
                round_to(rating_sum as f64 / total as f64, 2)
            },
            positive_pct: share(rating_distribution[3] + rating_distribution[4]),
            negative_pct: share(rating_distribution[0] + rating_distribution[1]),
            rating_distribution,
            sentiment: compute_sentiment(&texts),
            adjusted: compute_adjusted_metrics(reviews),
            problem_themes: cluster_reviews_by_theme(reviews, 1, 2, THEMES_PER_REPORT),
            win_themes: cluster_reviews_by_theme(reviews, 4, 5, THEMES_PER_REPORT),
            stop_reason: StopReason::default(),
        }
    }
}

/// Fetches and reports on each product in turn.
///
/// A product whose source cannot be built or whose run fails still gets a
/// report, built from whatever was collected.
pub async fn compare_products(
    factory: &dyn SourceFactory,
    product_ids: &[String],
    request: FetchRequest,
) -> Vec<ProductReport> {
    let mut reports = Vec::with_capacity(product_ids.len());
    for product_id in product_ids {
        let name = factory.display_name(product_id).await;
        let (reviews, stop_reason) = match factory.source_for(product_id) {
            Ok(source) => {
                let outcome = collect_all(source, request).await;
                (outcome.reviews, outcome.stop_reason)
            }
            Err(e) => {
                warn!(product = %product_id, "Could not build source: {e}");
                (Vec::new(), StopReason::Failed(e.to_string()))
            }
        };
        info!(product = %product_id, total = reviews.len(), "Collected reviews for comparison");

        let mut report = ProductReport::from_reviews(product_id, name, &reviews);
        report.stop_reason = stop_reason;
        reports.push(report);
    }
    reports
}
