//! # Fetching
//!
//! The cutoff-driven paginator and the three ways of consuming it:
//!
//! 1.  **Blocking collect-all** ([`collect_all`]): await the whole run.
//! 2.  **Background job** ([`JobRegistry`]): start, poll, collect.
//! 3.  **Progressive stream** ([`spawn_event_stream`]): typed events ending in `complete`.

pub mod events;
pub mod jobs;
pub mod paginator;
pub mod stream;

pub use events::{ErrorNotice, FetchEvent, FetchOutcome, ProgressUpdate, StopReason};
pub use jobs::{Job, JobRegistry, JobResult, JobStatus, JobStatusReport};
pub use paginator::{collect_all, FetchRequest, FetchRun};
pub use stream::{event_stream, spawn_event_stream};
