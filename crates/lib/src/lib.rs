//! # Review Ingestion and Analysis
//!
//! This crate is the core of revscope. It defines the [`ReviewSource`] contract
//! that source plugins (the App Store feed, Trustpilot pages) implement, the
//! cutoff-driven paginator and its three execution modes, and a deterministic
//! analytics pipeline over the collected reviews.
//!
//! The optional [`enrichment`] module tags reviews with problem categories via
//! an AI provider and degrades to empty results whenever that provider is
//! unavailable.

pub mod analysis;
pub mod comparison;
pub mod enrichment;
pub mod errors;
pub mod fetch;
pub mod prompts;
pub mod providers;
pub mod source;
pub mod types;

pub use comparison::{compare_products, ProductReport, SourceFactory};
pub use enrichment::{ProblemCategory, ProblemClassifier};
pub use errors::{JobError, PromptError, SourceError};
pub use fetch::{
    collect_all, spawn_event_stream, FetchEvent, FetchOutcome, FetchRequest, FetchRun,
    JobRegistry, JobStatus, StopReason,
};
pub use source::{ReviewSource, SourcePage};
pub use types::{BusinessInfo, Review, ReviewDraft, VERSION_NOT_AVAILABLE};
