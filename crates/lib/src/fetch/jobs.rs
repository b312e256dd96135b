//! # Background Jobs
//!
//! A start request allocates a [`Job`] under a random id and runs the paginator
//! on its own task. Callers poll [`JobRegistry::status`] and collect the reviews
//! with [`JobRegistry::result`] once the job is `done`.
//!
//! Jobs are never evicted; the registry lives as long as the process.

use super::events::{FetchEvent, FetchOutcome};
use super::paginator::{FetchRequest, FetchRun};
use crate::errors::JobError;
use crate::source::ReviewSource;
use crate::types::{BusinessInfo, Review};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Running,
    Done,
    Error,
}

#[derive(Debug, Clone)]
pub struct Job {
    pub id: String,
    pub status: JobStatus,
    pub total: usize,
    pub reviews: Vec<Review>,
    pub business_info: Option<BusinessInfo>,
    pub error: Option<String>,
}

impl Job {
    fn new(id: String) -> Self {
        Self {
            id,
            status: JobStatus::Pending,
            total: 0,
            reviews: Vec::new(),
            business_info: None,
            error: None,
        }
    }
}

/// The polling view of a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStatusReport {
    pub status: JobStatus,
    pub total: usize,
    pub error: Option<String>,
}

/// The result view of a finished job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResult {
    pub reviews: Vec<Review>,
    pub total: usize,
    pub business_info: Option<BusinessInfo>,
}

/// A shared, keyed store of jobs.
///
/// Each mutation clones the job, edits the copy and swaps it back in under the
/// write lock, so readers always see a complete record.
#[derive(Clone, Default)]
pub struct JobRegistry {
    jobs: Arc<RwLock<HashMap<String, Job>>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new job for `source` and schedules its run. Returns the job id.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn start(&self, source: Arc<dyn ReviewSource>, request: FetchRequest) -> String {
        let id = Uuid::new_v4().to_string();
        self.jobs
            .write()
            .await
            .insert(id.clone(), Job::new(id.clone()));
        info!(job_id = %id, source = source.name(), product = source.product_id(), "Job created");

        let registry = self.clone();
        let job_id = id.clone();
        tokio::spawn(async move {
            registry.drive(job_id, source, request).await;
        });
        id
    }

    async fn drive(&self, id: String, source: Arc<dyn ReviewSource>, request: FetchRequest) {
        self.update(&id, |job| job.status = JobStatus::Running)
            .await;

        let registry = self.clone();
        let run_id = id.clone();
        let run = tokio::spawn(async move {
            let mut run = FetchRun::new(source, request);
            while let Some(event) = run.next_event().await {
                match event {
                    FetchEvent::Progress(progress) => {
                        registry
                            .update(&run_id, |job| job.total = progress.reviews_so_far)
                            .await;
                    }
                    FetchEvent::Complete(outcome) => return outcome,
                    _ => {}
                }
            }
            FetchOutcome::default()
        });

        match run.await {
            Ok(outcome) => {
                info!(job_id = %id, total = outcome.reviews.len(), "Job done");
                self.update(&id, move |job| {
                    job.total = outcome.reviews.len();
                    job.reviews = outcome.reviews;
                    job.business_info = outcome.business_info;
                    job.status = JobStatus::Done;
                })
                .await;
            }
            Err(e) => {
                error!(job_id = %id, "Job task failed: {e}");
                self.update(&id, move |job| {
                    job.status = JobStatus::Error;
                    job.error = Some(e.to_string());
                })
                .await;
            }
        }
    }

    async fn update<F>(&self, id: &str, edit: F)
    where
        F: FnOnce(&mut Job),
    {
        let mut jobs = self.jobs.write().await;
        if let Some(current) = jobs.get(id) {
            let mut next = current.clone();
            edit(&mut next);
            jobs.insert(id.to_string(), next);
        }
    }

    pub async fn status(&self, id: &str) -> Result<JobStatusReport, JobError> {
        let jobs = self.jobs.read().await;
        let job = jobs.get(id).ok_or(JobError::NotFound)?;
        Ok(JobStatusReport {
            status: job.status,
            total: job.total,
            error: job.error.clone(),
        })
    }

    /// Returns the reviews of a finished job, or `NotReady` while it is still
    /// pending, running or failed.
    pub async fn result(&self, id: &str) -> Result<JobResult, JobError> {
        let jobs = self.jobs.read().await;
        let job = jobs.get(id).ok_or(JobError::NotFound)?;
        if job.status != JobStatus::Done {
            return Err(JobError::NotReady);
        }
        Ok(JobResult {
            reviews: job.reviews.clone(),
            total: job.total,
            business_info: job.business_info.clone(),
        })
    }

    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }
}
