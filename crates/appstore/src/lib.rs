//! # `revscope-appstore`: App Store Review Source
//!
//! This crate reads the public App Store customer-review feed as a
//! [`ReviewSource`] plugin for the `revscope` core, and wraps the iTunes lookup
//! and search endpoints used to resolve app names.
//!
//! The feed is a JSON rendition of an Atom document: every field is an object
//! with a `label` string. On the first page the feed may lead with an app
//! metadata entry; it carries no rating and is dropped by record validation
//! rather than skipped by position.

use async_trait::async_trait;
use reqwest::Client;
use revscope::comparison::SourceFactory;
use revscope::errors::SourceError;
use revscope::source::{ReviewSource, SourcePage};
use revscope::types::{parse_timestamp, ReviewDraft};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://itunes.apple.com";
pub const DEFAULT_LOOKUP_URL: &str = "https://itunes.apple.com/lookup";
pub const DEFAULT_SEARCH_URL: &str = "https://itunes.apple.com/search";

/// Endpoints and timeout for the App Store client.
#[derive(Debug, Clone)]
pub struct AppStoreConfig {
    pub base_url: String,
    pub lookup_url: String,
    pub search_url: String,
    pub timeout: Duration,
}

impl Default for AppStoreConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            lookup_url: DEFAULT_LOOKUP_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

/// One App Store search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSearchResult {
    pub id: String,
    pub name: String,
    pub developer: String,
    pub icon: String,
    pub bundle: String,
    pub price: String,
    pub rating: f64,
    pub ratings_count: u64,
}

/// Shared HTTP client for the feed, lookup and search endpoints.
#[derive(Debug, Clone)]
pub struct AppStoreClient {
    client: Client,
    config: AppStoreConfig,
}

impl AppStoreClient {
    pub fn new(config: AppStoreConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(SourceError::ClientBuild)?;
        Ok(Self { client, config })
    }

    /// A review source for one app in one storefront.
    pub fn source(&self, app_id: &str, country: &str) -> AppStoreSource {
        AppStoreSource {
            client: self.client.clone(),
            base_url: self.config.base_url.trim_end_matches('/').to_string(),
            app_id: app_id.trim().to_string(),
            country: country.trim().to_lowercase(),
        }
    }

    /// Resolves an app's display name, falling back to `App {id}`.
    pub async fn lookup_app_name(&self, app_id: &str, country: &str) -> String {
        match self.try_lookup(app_id, country).await {
            Ok(Some(name)) => name,
            Ok(None) => format!("App {app_id}"),
            Err(e) => {
                warn!(app_id, "App lookup failed: {e}");
                format!("App {app_id}")
            }
        }
    }

    async fn try_lookup(&self, app_id: &str, country: &str) -> Result<Option<String>, SourceError> {
        let body: Value = self
            .client
            .get(&self.config.lookup_url)
            .query(&[("id", app_id), ("country", country)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body["results"]
            .get(0)
            .and_then(|result| result["trackName"].as_str())
            .map(str::to_string))
    }

    /// Searches the store for apps. Any failure yields an empty list.
    pub async fn search_apps(&self, term: &str, country: &str, limit: u32) -> Vec<AppSearchResult> {
        match self.try_search(term, country, limit).await {
            Ok(results) => results,
            Err(e) => {
                warn!(term, "App search failed: {e}");
                Vec::new()
            }
        }
    }

    async fn try_search(
        &self,
        term: &str,
        country: &str,
        limit: u32,
    ) -> Result<Vec<AppSearchResult>, SourceError> {
        let limit = limit.to_string();
        let body: Value = self
            .client
            .get(&self.config.search_url)
            .query(&[
                ("term", term),
                ("entity", "software"),
                ("country", country),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let results = body["results"].as_array().cloned().unwrap_or_default();
        Ok(results.iter().map(search_result).collect())
    }
}

fn search_result(raw: &Value) -> AppSearchResult {
    let text = |key: &str, fallback: &str| raw[key].as_str().unwrap_or(fallback).to_string();
    AppSearchResult {
        id: match &raw["trackId"] {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            _ => String::new(),
        },
        name: text("trackName", ""),
        developer: text("artistName", ""),
        icon: text("artworkUrl60", ""),
        bundle: text("bundleId", ""),
        price: text("formattedPrice", "Free"),
        rating: raw["averageUserRating"].as_f64().unwrap_or(0.0),
        ratings_count: raw["userRatingCount"].as_u64().unwrap_or(0),
    }
}

/// The customer-review feed of a single app.
#[derive(Debug, Clone)]
pub struct AppStoreSource {
    client: Client,
    base_url: String,
    app_id: String,
    country: String,
}

impl AppStoreSource {
    pub fn build_url(&self, page: u32) -> String {
        format!(
            "{}/{}/rss/customerreviews/page={page}/id={}/sortBy=mostRecent/json",
            self.base_url, self.country, self.app_id
        )
    }
}

#[async_trait]
impl ReviewSource for AppStoreSource {
    fn name(&self) -> &str {
        "appstore"
    }

    fn product_id(&self) -> &str {
        &self.app_id
    }

    async fn fetch_page(&self, page: u32) -> Result<SourcePage, SourceError> {
        let url = self.build_url(page);
        debug!(%url, "Requesting App Store feed page");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text)?;
        Ok(parse_feed(&body))
    }
}

/// Decodes a feed document. Missing `feed` or `entry` keys mean an empty page.
pub fn parse_feed(body: &Value) -> SourcePage {
    let node = &body["feed"]["entry"];
    let entries: Vec<&Value> = match node {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![node],
        _ => Vec::new(),
    };
    let raw_count = entries.len();
    let entries: Vec<_> = entries
        .into_iter()
        .filter_map(|entry| parse_entry(entry).validate())
        .collect();
    if entries.len() < raw_count {
        debug!(dropped = raw_count - entries.len(), "Dropped feed entries without date or rating");
    }
    SourcePage {
        entries,
        ..Default::default()
    }
}

fn label<'a>(entry: &'a Value, path: &[&str]) -> Option<&'a str> {
    path.iter()
        .try_fold(entry, |node, key| node.get(key))
        .and_then(|node| node.get("label"))
        .and_then(Value::as_str)
}

/// Maps one feed entry into a draft, substituting empty text for missing fields.
pub fn parse_entry(entry: &Value) -> ReviewDraft {
    let text = |path: &[&str]| label(entry, path).unwrap_or_default().to_string();
    ReviewDraft {
        date: label(entry, &["updated"]).and_then(parse_timestamp),
        rating: label(entry, &["im:rating"]).and_then(|r| r.trim().parse().ok()),
        title: text(&["title"]),
        review: text(&["content"]),
        author: text(&["author", "name"]),
        version: label(entry, &["im:version"]).map(str::to_string),
    }
}

/// Builds App Store sources for one storefront, for product comparison.
#[derive(Debug, Clone)]
pub struct AppStoreCatalog {
    client: AppStoreClient,
    country: String,
}

impl AppStoreCatalog {
    pub fn new(client: AppStoreClient, country: &str) -> Self {
        Self {
            client,
            country: country.to_string(),
        }
    }
}

#[async_trait]
impl SourceFactory for AppStoreCatalog {
    fn source_for(&self, product_id: &str) -> Result<Arc<dyn ReviewSource>, SourceError> {
        Ok(Arc::new(self.client.source(product_id, &self.country)))
    }

    async fn display_name(&self, product_id: &str) -> String {
        self.client.lookup_app_name(product_id, &self.country).await
    }
}
