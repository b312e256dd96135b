//! Request and response payloads of the HTTP API.
//!
//! Fetch parameters left out of a request fall back to the `fetch` section of
//! the configuration.

use revscope::enrichment::ProblemCategory;
use revscope::Review;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// --- Fetching ---

#[derive(Debug, Deserialize)]
pub struct AppStoreFetchParams {
    pub app_id: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub max_pages: Option<u32>,
    #[serde(default)]
    pub cutoff_days: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct TrustpilotFetchParams {
    pub domain: String,
    #[serde(default)]
    pub max_pages: Option<u32>,
    #[serde(default)]
    pub cutoff_days: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JobStarted {
    pub job_id: String,
}

// --- Analysis ---

#[derive(Debug, Deserialize)]
pub struct TextsRequest {
    pub texts: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub texts: Vec<String>,
    #[serde(default = "default_keywords_top_n")]
    pub top_n: usize,
}

fn default_keywords_top_n() -> usize {
    30
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct KeywordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct ReviewsRequest {
    pub reviews: Vec<Review>,
}

#[derive(Debug, Deserialize)]
pub struct ThemesRequest {
    pub reviews: Vec<Review>,
    #[serde(default = "default_rating_min")]
    pub rating_min: u8,
    #[serde(default = "default_rating_max")]
    pub rating_max: u8,
    #[serde(default = "default_themes_top_n")]
    pub top_n: usize,
}

fn default_rating_min() -> u8 {
    1
}

fn default_rating_max() -> u8 {
    2
}

fn default_themes_top_n() -> usize {
    5
}

/// Problem categories per review, in request order, plus their totals.
#[derive(Debug, Serialize)]
pub struct ProblemsResponse {
    pub enabled: bool,
    pub categories: Vec<Vec<ProblemCategory>>,
    pub tally: BTreeMap<ProblemCategory, usize>,
}

// --- Comparison ---

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub app_ids: Vec<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub max_pages: Option<u32>,
    #[serde(default)]
    pub cutoff_days: Option<i64>,
}

// --- App catalog ---

#[derive(Debug, Deserialize)]
pub struct AppSearchParams {
    pub query: String,
    #[serde(default = "default_catalog_country")]
    pub country: String,
    #[serde(default = "default_search_limit")]
    pub limit: u32,
}

#[derive(Debug, Deserialize)]
pub struct AppLookupParams {
    #[serde(default = "default_catalog_country")]
    pub country: String,
}

fn default_catalog_country() -> String {
    "us".to_string()
}

fn default_search_limit() -> u32 {
    10
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AppInfo {
    pub id: String,
    pub name: String,
}
