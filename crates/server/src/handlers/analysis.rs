//! # Analysis Handlers
//!
//! Stateless wrappers over the analytics pipeline. The caller posts reviews
//! (or raw texts) it already holds, typically the result of a job or stream.

use super::{AppError, AppState};
use crate::types::{
    KeywordCount, KeywordsRequest, ProblemsResponse, ReviewsRequest, TextsRequest, ThemesRequest,
};
use axum::{extract::State, Json};
use revscope::analysis::{
    cluster_reviews_by_theme, compute_adjusted_metrics, compute_sentiment, extract_keywords,
    version_insights, AdjustedMetrics, SentimentReport, Theme, VersionInsight,
};
use revscope::enrichment::tally;
use tracing::info;

pub async fn sentiment(Json(payload): Json<TextsRequest>) -> Json<SentimentReport> {
    Json(compute_sentiment(&payload.texts))
}

pub async fn keywords(Json(payload): Json<KeywordsRequest>) -> Json<Vec<KeywordCount>> {
    let keywords = extract_keywords(&payload.texts, payload.top_n)
        .into_iter()
        .map(|(word, count)| KeywordCount { word, count })
        .collect();
    Json(keywords)
}

pub async fn themes(Json(payload): Json<ThemesRequest>) -> Result<Json<Vec<Theme>>, AppError> {
    let (min, max) = (payload.rating_min, payload.rating_max);
    if !(1..=5).contains(&min) || !(1..=5).contains(&max) || min > max {
        return Err(AppError::BadRequest(format!(
            "Invalid rating band {min}..={max}; expected 1 <= rating_min <= rating_max <= 5"
        )));
    }
    Ok(Json(cluster_reviews_by_theme(
        &payload.reviews,
        min,
        max,
        payload.top_n,
    )))
}

pub async fn adjusted_metrics(Json(payload): Json<ReviewsRequest>) -> Json<AdjustedMetrics> {
    Json(compute_adjusted_metrics(&payload.reviews))
}

pub async fn versions(Json(payload): Json<ReviewsRequest>) -> Json<Vec<VersionInsight>> {
    Json(version_insights(&payload.reviews))
}

/// Tags each review with problem categories. Answers with empty lists, not an
/// error, when classification is disabled or the provider fails.
pub async fn problems(
    State(app_state): State<AppState>,
    Json(payload): Json<ReviewsRequest>,
) -> Json<ProblemsResponse> {
    info!(reviews = payload.reviews.len(), "Classifying review problems");
    let categories = app_state.classifier.classify_reviews(&payload.reviews).await;
    Json(ProblemsResponse {
        enabled: app_state.classifier.is_enabled(),
        tally: tally(&categories),
        categories,
    })
}
