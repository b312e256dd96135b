//! # Problem Enrichment
//!
//! Tags review texts with problem categories using an external AI provider.
//! Texts are sent in fixed-size batches with a bounded number of batches in
//! flight. This step never fails: a missing provider, a transport error, or a
//! reply that does not line up with the batch yields empty category lists for
//! the affected texts.

use crate::errors::PromptError;
use crate::prompts::{PROBLEM_CLASSIFICATION_SYSTEM_PROMPT, PROBLEM_CLASSIFICATION_USER_PROMPT};
use crate::providers::ai::AiProvider;
use crate::types::Review;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

pub const DEFAULT_BATCH_SIZE: usize = 20;
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProblemCategory {
    Technical,
    Design,
    CustomerExperience,
    Pricing,
    Performance,
}

impl ProblemCategory {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "TECHNICAL" => Some(Self::Technical),
            "DESIGN" => Some(Self::Design),
            "CUSTOMER_EXPERIENCE" => Some(Self::CustomerExperience),
            "PRICING" => Some(Self::Pricing),
            "PERFORMANCE" => Some(Self::Performance),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
enum EnrichmentError {
    #[error(transparent)]
    Provider(#[from] PromptError),
    #[error("Malformed classification reply: {0}")]
    Malformed(String),
    #[error("Expected {expected} classifications, got {got}")]
    LengthMismatch { expected: usize, got: usize },
}

/// Batch problem classifier over an optional AI provider.
#[derive(Clone, Debug)]
pub struct ProblemClassifier {
    provider: Option<Box<dyn AiProvider>>,
    batch_size: usize,
    max_concurrency: usize,
}

impl ProblemClassifier {
    pub fn new(provider: Option<Box<dyn AiProvider>>) -> Self {
        Self {
            provider,
            batch_size: DEFAULT_BATCH_SIZE,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Returns one category list per input text, in input order.
    pub async fn classify<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Vec<ProblemCategory>> {
        let Some(provider) = &self.provider else {
            debug!("No AI provider configured; skipping problem classification.");
            return vec![Vec::new(); texts.len()];
        };

        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let batches = texts.chunks(self.batch_size).enumerate().map(|(index, chunk)| {
            let semaphore = semaphore.clone();
            async move {
                let _permit = semaphore.acquire().await.ok();
                match classify_batch(&**provider, chunk).await {
                    Ok(categories) => categories,
                    Err(e) => {
                        warn!(batch = index, size = chunk.len(), "Problem classification degraded: {e}");
                        vec![Vec::new(); chunk.len()]
                    }
                }
            }
        });

        join_all(batches).await.into_iter().flatten().collect()
    }

    pub async fn classify_reviews(&self, reviews: &[Review]) -> Vec<Vec<ProblemCategory>> {
        let texts: Vec<String> = reviews.iter().map(Review::full_text).collect();
        self.classify(&texts).await
    }
}

async fn classify_batch<S: AsRef<str>>(
    provider: &dyn AiProvider,
    texts: &[S],
) -> Result<Vec<Vec<ProblemCategory>>, EnrichmentError> {
    let numbered = texts
        .iter()
        .enumerate()
        .map(|(i, text)| format!("{}. {}", i + 1, text.as_ref().replace('\n', " ")))
        .collect::<Vec<_>>()
        .join("\n");
    let user_prompt = PROBLEM_CLASSIFICATION_USER_PROMPT
        .replace("{count}", &texts.len().to_string())
        .replace("{reviews}", &numbered);

    let reply = provider
        .generate(PROBLEM_CLASSIFICATION_SYSTEM_PROMPT, &user_prompt)
        .await?;
    parse_reply(&reply, texts.len())
}

/// Extracts the outer JSON array from a reply that may be wrapped in prose or
/// a markdown fence.
fn parse_reply(reply: &str, expected: usize) -> Result<Vec<Vec<ProblemCategory>>, EnrichmentError> {
    let (Some(start), Some(end)) = (reply.find('['), reply.rfind(']')) else {
        return Err(EnrichmentError::Malformed("no JSON array".to_string()));
    };
    if end < start {
        return Err(EnrichmentError::Malformed("no JSON array".to_string()));
    }

    let rows: Vec<Vec<String>> = serde_json::from_str(&reply[start..=end])
        .map_err(|e| EnrichmentError::Malformed(e.to_string()))?;
    if rows.len() != expected {
        return Err(EnrichmentError::LengthMismatch {
            expected,
            got: rows.len(),
        });
    }

    Ok(rows
        .into_iter()
        .map(|labels| {
            labels
                .iter()
                .filter_map(|label| ProblemCategory::from_label(label))
                .collect()
        })
        .collect())
}

/// Counts how many texts were tagged with each category.
pub fn tally(classified: &[Vec<ProblemCategory>]) -> BTreeMap<ProblemCategory, usize> {
    let mut counts = BTreeMap::new();
    for categories in classified {
        for category in categories {
            *counts.entry(*category).or_insert(0) += 1;
        }
    }
    counts
}
