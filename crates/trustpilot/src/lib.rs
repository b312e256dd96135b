//! # `revscope-trustpilot`: Trustpilot Review Source
//!
//! This crate reads Trustpilot business review pages as a [`ReviewSource`]
//! plugin for the `revscope` core. Trustpilot renders its pages server-side and
//! embeds the page state as JSON in a `__NEXT_DATA__` script tag; that block is
//! the only part of the HTML this crate reads.
//!
//! Pages are requested from the localized host first and from the generic host
//! only when the localized one answers 404.

use async_trait::async_trait;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, StatusCode};
use revscope::errors::SourceError;
use revscope::source::{ReviewSource, SourcePage};
use revscope::types::{parse_timestamp, BusinessInfo, ReviewDraft, VERSION_NOT_AVAILABLE};
use serde_json::Value;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_LOCALIZED_BASE_URL: &str = "https://it.trustpilot.com";
pub const DEFAULT_FALLBACK_BASE_URL: &str = "https://www.trustpilot.com";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const MIN_PAGE_BYTES: usize = 1000;

static NEXT_DATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<script id="__NEXT_DATA__"[^>]*>(.*?)</script>"#)
        .expect("__NEXT_DATA__ pattern is a valid regex")
});

const REVIEW_URL_PREFIXES: &[&str] = &[
    "https://it.trustpilot.com/review/",
    "https://www.trustpilot.com/review/",
    "http://it.trustpilot.com/review/",
    "http://www.trustpilot.com/review/",
    "it.trustpilot.com/review/",
    "www.trustpilot.com/review/",
    "trustpilot.com/review/",
    "https://",
    "http://",
    "www.",
];

/// Normalizes user input (a bare domain, a site URL or a Trustpilot review
/// URL) to the business domain Trustpilot keys its pages on.
pub fn clean_domain(raw: &str) -> String {
    let mut domain = raw.trim().trim_end_matches('/');
    let lowered = domain.to_lowercase();
    if let Some(prefix) = REVIEW_URL_PREFIXES
        .iter()
        .find(|prefix| lowered.starts_with(*prefix))
    {
        domain = &domain[prefix.len()..];
    }
    let domain = domain.split(['?', '#']).next().unwrap_or_default();
    domain.trim_matches('/').to_string()
}

/// Hosts and timeout for the Trustpilot client.
#[derive(Debug, Clone)]
pub struct TrustpilotConfig {
    pub localized_base_url: String,
    pub fallback_base_url: String,
    pub timeout: Duration,
}

impl Default for TrustpilotConfig {
    fn default() -> Self {
        Self {
            localized_base_url: DEFAULT_LOCALIZED_BASE_URL.to_string(),
            fallback_base_url: DEFAULT_FALLBACK_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// The review pages of one business.
#[derive(Debug, Clone)]
pub struct TrustpilotSource {
    client: Client,
    hosts: [String; 2],
    domain: String,
}

impl TrustpilotSource {
    /// Builds a source for `domain`, which is normalized with [`clean_domain`].
    pub fn new(domain: &str, config: &TrustpilotConfig) -> Result<Self, SourceError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("text/html"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("it-IT,it;q=0.9"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(SourceError::ClientBuild)?;

        Ok(Self {
            client,
            hosts: [
                config.localized_base_url.trim_end_matches('/').to_string(),
                config.fallback_base_url.trim_end_matches('/').to_string(),
            ],
            domain: clean_domain(domain),
        })
    }

    async fn fetch_html(&self, page: u32) -> Result<String, SourceError> {
        for (index, host) in self.hosts.iter().enumerate() {
            let url = format!("{host}/review/{}?page={page}", self.domain);
            debug!(%url, "Requesting Trustpilot page");
            let response = self.client.get(&url).send().await?;
            let status = response.status();

            if status == StatusCode::NOT_FOUND && index == 0 {
                info!(domain = %self.domain, "Not found on the localized host, trying the generic one");
                continue;
            }
            if status == StatusCode::NOT_FOUND {
                return Err(SourceError::NotFound(format!(
                    "Domain '{}' on Trustpilot",
                    self.domain
                )));
            }
            if !status.is_success() {
                return Err(SourceError::Status(status.as_u16()));
            }
            return Ok(response.text().await?);
        }
        Err(SourceError::NotFound(format!("Domain '{}' on Trustpilot", self.domain)))
    }
}

#[async_trait]
impl ReviewSource for TrustpilotSource {
    fn name(&self) -> &str {
        "trustpilot"
    }

    fn product_id(&self) -> &str {
        &self.domain
    }

    async fn fetch_page(&self, page: u32) -> Result<SourcePage, SourceError> {
        let html = self.fetch_html(page).await?;
        parse_page(&html, &self.domain, page)
    }
}

/// Extracts the embedded page state from a review page.
pub fn extract_next_data(html: &str) -> Result<Value, SourceError> {
    if html.len() < MIN_PAGE_BYTES {
        return Err(SourceError::Blocked(format!(
            "Response too short ({} bytes)",
            html.len()
        )));
    }
    let payload = NEXT_DATA_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| SourceError::Parse("Could not find review data in page".to_string()))?;
    Ok(serde_json::from_str(payload.as_str())?)
}

/// Decodes one review page. Business info and the page count are only read on
/// the first page.
pub fn parse_page(html: &str, domain: &str, page: u32) -> Result<SourcePage, SourceError> {
    let data = extract_next_data(html)?;
    let props = &data["props"]["pageProps"];

    let mut result = SourcePage::default();
    if page == 1 {
        result.business_info = Some(business_info(&props["businessUnit"], domain));
        result.total_pages = Some(
            props["filters"]["pagination"]["totalPages"]
                .as_u64()
                .map_or(1, |total| u32::try_from(total).unwrap_or(u32::MAX)),
        );
    }

    result.entries = props["reviews"]
        .as_array()
        .map(|reviews| {
            reviews
                .iter()
                .filter_map(|review| parse_review(review).validate())
                .collect()
        })
        .unwrap_or_default();
    Ok(result)
}

fn business_info(unit: &Value, domain: &str) -> BusinessInfo {
    BusinessInfo {
        display_name: unit["displayName"].as_str().unwrap_or(domain).to_string(),
        trust_score: unit["trustScore"].as_f64().unwrap_or(0.0),
        star_rating: unit["stars"].as_f64().unwrap_or(0.0),
        total_reviews: unit["numberOfReviews"].as_u64().unwrap_or(0),
    }
}

pub fn parse_review(review: &Value) -> ReviewDraft {
    let text = |value: &Value| value.as_str().unwrap_or_default().to_string();
    ReviewDraft {
        date: review["dates"]["publishedDate"]
            .as_str()
            .and_then(parse_timestamp),
        rating: review["rating"].as_i64(),
        title: text(&review["title"]),
        review: text(&review["text"]),
        author: text(&review["consumer"]["displayName"]),
        version: Some(VERSION_NOT_AVAILABLE.to_string()),
    }
}
