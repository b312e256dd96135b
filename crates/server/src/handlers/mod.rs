//! # API Route Handlers
//!
//! The handlers are split into sub-modules by surface: fetch jobs, progressive
//! streams, analysis, comparison and the app catalog.

pub mod analysis;
pub mod apps;
pub mod compare;
pub mod general;
pub mod jobs;
pub mod stream;

pub use analysis::*;
pub use apps::*;
pub use compare::*;
pub use general::*;
pub use jobs::*;
pub use stream::*;

// Shared items used by multiple handler modules.
use super::{
    config::FetchDefaults,
    errors::AppError,
    state::AppState,
    types::{AppStoreFetchParams, TrustpilotFetchParams},
};
use revscope::{FetchRequest, ReviewSource};
use revscope_trustpilot::TrustpilotSource;
use std::sync::Arc;

const MAX_CUTOFF_DAYS: i64 = 36_500;

/// Resolves optional fetch parameters against the configured defaults.
pub(crate) fn resolve_request(
    defaults: &FetchDefaults,
    max_pages: Option<u32>,
    cutoff_days: Option<i64>,
) -> Result<FetchRequest, AppError> {
    let max_pages = max_pages.unwrap_or(defaults.default_max_pages);
    let cutoff_days = cutoff_days.unwrap_or(defaults.default_cutoff_days);
    if max_pages == 0 {
        return Err(AppError::BadRequest("max_pages must be at least 1".to_string()));
    }
    if !(0..=MAX_CUTOFF_DAYS).contains(&cutoff_days) {
        return Err(AppError::BadRequest(format!(
            "cutoff_days must be between 0 and {MAX_CUTOFF_DAYS}"
        )));
    }
    Ok(FetchRequest::from_days(max_pages, cutoff_days))
}

pub(crate) fn require_non_empty<'a>(field: &str, value: &'a str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(trimmed)
}

pub(crate) fn country_or_default(state: &AppState, country: Option<&str>) -> String {
    country
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(&state.config.fetch.default_country)
        .to_lowercase()
}

/// Builds the App Store source and fetch request shared by the job and stream surfaces.
pub(crate) fn appstore_run(
    state: &AppState,
    params: &AppStoreFetchParams,
) -> Result<(Arc<dyn ReviewSource>, FetchRequest), AppError> {
    let app_id = require_non_empty("app_id", &params.app_id)?;
    let request = resolve_request(&state.config.fetch, params.max_pages, params.cutoff_days)?;
    let country = country_or_default(state, params.country.as_deref());
    Ok((Arc::new(state.appstore.source(app_id, &country)), request))
}

pub(crate) fn trustpilot_run(
    state: &AppState,
    params: &TrustpilotFetchParams,
) -> Result<(Arc<dyn ReviewSource>, FetchRequest), AppError> {
    let domain = require_non_empty("domain", &params.domain)?;
    let request = resolve_request(&state.config.fetch, params.max_pages, params.cutoff_days)?;
    let source = TrustpilotSource::new(domain, &state.trustpilot)?;
    if source.product_id().is_empty() {
        return Err(AppError::BadRequest(format!("'{domain}' is not a usable domain")));
    }
    Ok((Arc::new(source), request))
}
