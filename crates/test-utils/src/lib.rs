use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use revscope::errors::{PromptError, SourceError};
use revscope::providers::ai::AiProvider;
use revscope::source::{ReviewSource, SourcePage};
use revscope::types::{BusinessInfo, Review};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

// --- Review Builders ---

/// A review dated `days_ago` days before now.
pub fn review_days_ago(days_ago: i64, rating: u8, text: &str) -> Review {
    Review::new(Utc::now() - Duration::days(days_ago), rating, "", text)
}

/// A review at a fixed RFC 3339 timestamp.
pub fn review_at(timestamp: &str, rating: u8, title: &str, text: &str) -> Review {
    let date = DateTime::parse_from_rfc3339(timestamp)
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_else(|e| panic!("bad fixture timestamp '{timestamp}': {e}"));
    Review::new(date, rating, title, text)
}

// --- Scripted Review Source ---

/// One scripted response of a [`ScriptedSource`].
#[derive(Debug, Clone)]
pub enum ScriptedPage {
    Page(SourcePage),
    Fail(String),
}

impl ScriptedPage {
    pub fn reviews(entries: Vec<Review>) -> Self {
        Self::Page(SourcePage {
            entries,
            ..Default::default()
        })
    }

    pub fn last(entries: Vec<Review>) -> Self {
        Self::Page(SourcePage {
            entries,
            is_last: true,
            ..Default::default()
        })
    }
}

/// A [`ReviewSource`] that replays a fixed list of pages. Pages beyond the
/// script come back empty.
#[derive(Debug)]
pub struct ScriptedSource {
    product_id: String,
    pages: Vec<ScriptedPage>,
    delay: Option<std::time::Duration>,
    calls: AtomicU32,
}

impl ScriptedSource {
    pub fn new(product_id: &str, pages: Vec<ScriptedPage>) -> Self {
        Self {
            product_id: product_id.to_string(),
            pages,
            delay: None,
            calls: AtomicU32::new(0),
        }
    }

    /// Sleeps before answering each page.
    pub fn with_delay(mut self, delay: std::time::Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn into_arc(self) -> Arc<dyn ReviewSource> {
        Arc::new(self)
    }

    /// How many pages have been requested so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReviewSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    fn product_id(&self) -> &str {
        &self.product_id
    }

    async fn fetch_page(&self, page: u32) -> Result<SourcePage, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.pages.get(page as usize - 1) {
            Some(ScriptedPage::Page(p)) => Ok(p.clone()),
            Some(ScriptedPage::Fail(message)) => Err(SourceError::Parse(message.clone())),
            None => Ok(SourcePage::default()),
        }
    }
}

// --- Mock AI Provider ---

/// Replays queued responses in call order and records every prompt.
#[derive(Clone, Debug, Default)]
pub struct MockAiProvider {
    responses: Arc<Mutex<VecDeque<Result<String, String>>>>,
    keyed: Arc<Mutex<Vec<(String, String)>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response for the next unmatched call.
    pub fn push_response(&self, response: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(response.to_string()));
    }

    /// Queues an API failure for the next unmatched call.
    pub fn push_failure(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    /// Answers any call whose user prompt contains `key`.
    pub fn add_response(&self, key: &str, response: &str) {
        self.keyed
            .lock()
            .unwrap()
            .push((key.to_string(), response.to_string()));
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        if let Some((_, response)) = self
            .keyed
            .lock()
            .unwrap()
            .iter()
            .find(|(key, _)| user_prompt.contains(key.as_str()))
        {
            return Ok(response.clone());
        }

        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(PromptError::AiApi(message)),
            None => Err(PromptError::AiApi(
                "MockAiProvider: no response programmed".to_string(),
            )),
        }
    }
}

// --- Upstream Fixtures ---

/// An App Store customer-review feed page holding `reviews`, optionally led
/// by the app metadata entry the live feed puts first.
pub fn appstore_feed(reviews: &[Review], with_header: bool) -> Value {
    let mut entries: Vec<Value> = Vec::new();
    if with_header {
        entries.push(json!({
            "im:name": { "label": "Fixture App" },
            "title": { "label": "Fixture App - Fixture Inc." },
            "updated": { "label": "2020-01-01T00:00:00-07:00" }
        }));
    }
    for review in reviews {
        entries.push(json!({
            "author": { "name": { "label": review.author } },
            "updated": { "label": review.date.to_rfc3339() },
            "im:rating": { "label": review.rating.to_string() },
            "im:version": { "label": review.version },
            "title": { "label": review.title },
            "content": { "label": review.review, "attributes": { "type": "text" } }
        }));
    }
    json!({ "feed": { "entry": entries } })
}

/// A Trustpilot review page embedding `reviews` in its `__NEXT_DATA__` block.
pub fn trustpilot_page(
    business: &BusinessInfo,
    reviews: &[Review],
    total_pages: u32,
) -> String {
    let reviews: Vec<Value> = reviews
        .iter()
        .map(|review| {
            json!({
                "id": format!("r-{}", review.date.timestamp()),
                "rating": review.rating,
                "title": review.title,
                "text": review.review,
                "dates": { "publishedDate": review.date.to_rfc3339() },
                "consumer": { "displayName": review.author }
            })
        })
        .collect();
    let data = json!({
        "props": {
            "pageProps": {
                "businessUnit": {
                    "displayName": business.display_name,
                    "trustScore": business.trust_score,
                    "stars": business.star_rating,
                    "numberOfReviews": business.total_reviews
                },
                "filters": { "pagination": { "currentPage": 1, "totalPages": total_pages } },
                "reviews": reviews
            }
        }
    });
    html_with_next_data(&data.to_string())
}

/// Wraps a raw `__NEXT_DATA__` payload in enough page chrome to look real.
pub fn html_with_next_data(payload: &str) -> String {
    let filler = "<div class=\"styles_wrapper\"><p>Reviews are published by consumers.</p></div>\n"
        .repeat(20);
    format!(
        "<!DOCTYPE html><html lang=\"it\"><head><meta charset=\"utf-8\"><title>Recensioni</title></head>\
         <body>{filler}<script id=\"__NEXT_DATA__\" type=\"application/json\">{payload}</script></body></html>"
    )
}

pub fn sample_business() -> BusinessInfo {
    BusinessInfo {
        display_name: "Example Shop".to_string(),
        trust_score: 4.2,
        star_rating: 4.0,
        total_reviews: 1234,
    }
}
