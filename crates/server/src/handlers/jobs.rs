//! # Job Handlers
//!
//! Start a background fetch, poll its status, and collect its reviews once it
//! is done.

use super::{appstore_run, trustpilot_run, AppError, AppState};
use crate::types::{AppStoreFetchParams, JobStarted, TrustpilotFetchParams};
use axum::{
    extract::{Path, State},
    Json,
};
use revscope::fetch::{JobResult, JobStatusReport};
use tracing::info;

pub async fn start_appstore_job(
    State(app_state): State<AppState>,
    Json(params): Json<AppStoreFetchParams>,
) -> Result<Json<JobStarted>, AppError> {
    let (source, request) = appstore_run(&app_state, &params)?;
    let job_id = app_state.jobs.start(source, request).await;
    info!(%job_id, app_id = %params.app_id, "Started App Store job");
    Ok(Json(JobStarted { job_id }))
}

pub async fn start_trustpilot_job(
    State(app_state): State<AppState>,
    Json(params): Json<TrustpilotFetchParams>,
) -> Result<Json<JobStarted>, AppError> {
    let (source, request) = trustpilot_run(&app_state, &params)?;
    let job_id = app_state.jobs.start(source, request).await;
    info!(%job_id, domain = %params.domain, "Started Trustpilot job");
    Ok(Json(JobStarted { job_id }))
}

pub async fn job_status(
    State(app_state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobStatusReport>, AppError> {
    Ok(Json(app_state.jobs.status(&job_id).await?))
}

pub async fn job_result(
    State(app_state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobResult>, AppError> {
    Ok(Json(app_state.jobs.result(&job_id).await?))
}
