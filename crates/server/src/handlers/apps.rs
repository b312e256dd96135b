//! # App Catalog Handlers
//!
//! Search and name lookup against the App Store. Both degrade instead of
//! failing: an upstream error yields no hits, or the `App {id}` fallback name.

use super::{require_non_empty, AppError, AppState};
use crate::types::{AppInfo, AppLookupParams, AppSearchParams};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use revscope_appstore::AppSearchResult;

pub async fn search_apps(
    State(app_state): State<AppState>,
    Query(params): Query<AppSearchParams>,
) -> Result<Json<Vec<AppSearchResult>>, AppError> {
    let query = require_non_empty("query", &params.query)?;
    let results = app_state
        .appstore
        .search_apps(query, &params.country, params.limit)
        .await;
    Ok(Json(results))
}

pub async fn get_app(
    State(app_state): State<AppState>,
    Path(app_id): Path<String>,
    Query(params): Query<AppLookupParams>,
) -> Json<AppInfo> {
    let name = app_state
        .appstore
        .lookup_app_name(&app_id, &params.country)
        .await;
    Json(AppInfo { id: app_id, name })
}
