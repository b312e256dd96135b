//! # Review Source Contract
//!
//! Every upstream that can supply reviews (an app marketplace feed, a reviews
//! aggregator site) is a plugin crate implementing [`ReviewSource`]. The core
//! paginator only ever talks to this trait, which keeps the termination
//! heuristics identical across sources.

use crate::errors::SourceError;
use crate::types::{BusinessInfo, Review};
use async_trait::async_trait;

/// One decoded page of reviews.
#[derive(Debug, Clone, Default)]
pub struct SourcePage {
    /// Valid reviews on this page in upstream order. Records missing a date or
    /// rating have already been dropped.
    pub entries: Vec<Review>,
    /// Set when the upstream reports that no further pages exist.
    pub is_last: bool,
    /// Business metadata, only reported on the first page by sources that have it.
    pub business_info: Option<BusinessInfo>,
    /// The upstream's own page count, used to clamp the caller's page budget.
    pub total_pages: Option<u32>,
}

/// The contract for a review source plugin.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// A short, stable name used in log lines and progress messages.
    fn name(&self) -> &str;

    /// The product identifier this source instance fetches reviews for.
    fn product_id(&self) -> &str;

    /// Fetches and decodes a single page (1-based).
    ///
    /// Any error is terminal for the run; callers never retry.
    async fn fetch_page(&self, page: u32) -> Result<SourcePage, SourceError>;
}
