//! Event and outcome types emitted by a paginated fetch run.

use crate::types::{BusinessInfo, Review};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Why a run stopped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum StopReason {
    /// Every page in the (possibly clamped) budget was fetched.
    BudgetExhausted,
    /// A page had no usable entries.
    #[default]
    EmptyPage,
    /// A page after the first retained nothing newer than the cutoff.
    AllTooOld,
    /// The upstream flagged the page as its last.
    LastPage,
    /// A transport or parse failure aborted the run. Accumulated reviews are kept.
    Failed(String),
}

impl StopReason {
    pub fn is_failure(&self) -> bool {
        matches!(self, StopReason::Failed(_))
    }
}

/// The final result of a run. Always well-formed, possibly empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchOutcome {
    pub reviews: Vec<Review>,
    pub business_info: Option<BusinessInfo>,
    pub pages_fetched: u32,
    pub stop_reason: StopReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub page: u32,
    pub total_pages: u32,
    pub reviews_so_far: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorNotice {
    pub message: String,
}

/// A single event of a progressive stream. `Complete` is always last.
#[derive(Debug, Clone)]
pub enum FetchEvent {
    Progress(ProgressUpdate),
    BusinessInfo(BusinessInfo),
    Error(ErrorNotice),
    Complete(FetchOutcome),
}

impl FetchEvent {
    /// The wire name of the event.
    pub fn event_type(&self) -> &'static str {
        match self {
            FetchEvent::Progress(_) => "progress",
            FetchEvent::BusinessInfo(_) => "business_info",
            FetchEvent::Error(_) => "error",
            FetchEvent::Complete(_) => "complete",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, FetchEvent::Complete(_))
    }

    /// The JSON payload carried by the event.
    pub fn payload(&self) -> Value {
        match self {
            FetchEvent::Progress(update) => json!(update),
            FetchEvent::BusinessInfo(info) => json!(info),
            FetchEvent::Error(notice) => json!(notice),
            FetchEvent::Complete(outcome) => json!({
                "reviews": outcome.reviews,
                "total": outcome.reviews.len(),
                "business_info": outcome.business_info,
            }),
        }
    }
}
