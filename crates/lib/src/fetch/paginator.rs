//! # Cutoff Paginator
//!
//! Drives a [`ReviewSource`] page by page, keeping reviews at or after a cutoff
//! timestamp and deciding when to stop. The walk is modelled as an explicit
//! state machine that yields [`FetchEvent`]s; each execution mode consumes the
//! same machine in its own way.

use super::events::{ErrorNotice, FetchEvent, FetchOutcome, ProgressUpdate, StopReason};
use crate::source::ReviewSource;
use crate::types::{BusinessInfo, Review};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Parameters for a single paginated run.
#[derive(Debug, Clone, Copy)]
pub struct FetchRequest {
    /// The maximum number of pages to request. The aggregator may lower this.
    pub max_pages: u32,
    /// The earliest timestamp a review must have to be retained.
    pub cutoff: DateTime<Utc>,
}

impl FetchRequest {
    pub fn new(max_pages: u32, cutoff: DateTime<Utc>) -> Self {
        Self { max_pages, cutoff }
    }

    /// Builds a request whose cutoff is `cutoff_days` before now.
    pub fn from_days(max_pages: u32, cutoff_days: i64) -> Self {
        Self {
            max_pages,
            cutoff: Utc::now() - chrono::Duration::days(cutoff_days),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum RunState {
    Announce(u32),
    Fetch(u32),
    Finished(StopReason),
    Done,
}

/// A single, non-restartable walk over a source's pages.
pub struct FetchRun {
    source: Arc<dyn ReviewSource>,
    cutoff: DateTime<Utc>,
    budget: u32,
    state: RunState,
    pending: VecDeque<FetchEvent>,
    reviews: Vec<Review>,
    business_info: Option<BusinessInfo>,
    pages_fetched: u32,
}

impl FetchRun {
    pub fn new(source: Arc<dyn ReviewSource>, request: FetchRequest) -> Self {
        Self {
            source,
            cutoff: request.cutoff,
            budget: request.max_pages,
            state: RunState::Announce(1),
            pending: VecDeque::new(),
            reviews: Vec::new(),
            business_info: None,
            pages_fetched: 0,
        }
    }

    /// Advances the walk and returns the next event.
    ///
    /// The final event is always [`FetchEvent::Complete`]; after it, `None`.
    pub async fn next_event(&mut self) -> Option<FetchEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }

            match self.state.clone() {
                RunState::Announce(page) => {
                    if page > self.budget {
                        self.state = RunState::Finished(StopReason::BudgetExhausted);
                        continue;
                    }
                    self.state = RunState::Fetch(page);
                    return Some(FetchEvent::Progress(ProgressUpdate {
                        page,
                        total_pages: self.budget,
                        reviews_so_far: self.reviews.len(),
                        message: format!("{} page {page}/{}...", self.source.name(), self.budget),
                    }));
                }
                RunState::Fetch(page) => {
                    self.state = self.fetch(page).await;
                }
                RunState::Finished(reason) => {
                    self.state = RunState::Done;
                    info!(
                        source = self.source.name(),
                        product = self.source.product_id(),
                        pages = self.pages_fetched,
                        reviews = self.reviews.len(),
                        "Fetch run finished: {reason:?}"
                    );
                    return Some(FetchEvent::Complete(FetchOutcome {
                        reviews: std::mem::take(&mut self.reviews),
                        business_info: self.business_info.take(),
                        pages_fetched: self.pages_fetched,
                        stop_reason: reason,
                    }));
                }
                RunState::Done => return None,
            }
        }
    }

    async fn fetch(&mut self, page: u32) -> RunState {
        debug!(source = self.source.name(), page, "Fetching page");
        let result = match self.source.fetch_page(page).await {
            Ok(result) => result,
            Err(e) => {
                let message = format!("Page {page}: {e}");
                warn!(source = self.source.name(), "Aborting run. {message}");
                self.pending.push_back(FetchEvent::Error(ErrorNotice {
                    message: message.clone(),
                }));
                return RunState::Finished(StopReason::Failed(message));
            }
        };
        self.pages_fetched = page;

        if page == 1 {
            if let Some(total) = result.total_pages {
                if total < self.budget {
                    debug!(total, "Clamping page budget to upstream total");
                    self.budget = total;
                }
            }
            if let Some(info) = result.business_info {
                self.pending
                    .push_back(FetchEvent::BusinessInfo(info.clone()));
                self.business_info = Some(info);
            }
        }

        if result.entries.is_empty() {
            return RunState::Finished(StopReason::EmptyPage);
        }

        let before = self.reviews.len();
        self.reviews.extend(
            result
                .entries
                .into_iter()
                .filter(|review| review.date >= self.cutoff),
        );
        let retained = self.reviews.len() - before;
        debug!(page, retained, "Page processed");

        // Page 1 may carry pinned or older entries, so it never triggers the age stop.
        if retained == 0 && page > 1 {
            RunState::Finished(StopReason::AllTooOld)
        } else if result.is_last {
            RunState::Finished(StopReason::LastPage)
        } else {
            RunState::Announce(page + 1)
        }
    }

    /// Drives the walk to completion, discarding intermediate events.
    pub async fn run_to_end(mut self) -> FetchOutcome {
        while let Some(event) = self.next_event().await {
            if let FetchEvent::Complete(outcome) = event {
                return outcome;
            }
        }
        // `next_event` always yields `Complete` before `None`.
        FetchOutcome::default()
    }
}

/// Blocking collect-all: runs the paginator on the caller's task and returns the
/// final (possibly partial) result.
pub async fn collect_all(source: Arc<dyn ReviewSource>, request: FetchRequest) -> FetchOutcome {
    FetchRun::new(source, request).run_to_end().await
}
