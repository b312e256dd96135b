use super::{country_or_default, resolve_request, AppError, AppState};
use crate::types::CompareRequest;
use axum::{extract::State, Json};
use revscope::compare_products;
use revscope::ProductReport;
use revscope_appstore::AppStoreCatalog;
use tracing::info;

const MAX_COMPARED_APPS: usize = 10;

/// Fetches every app in turn and reports them side by side, in request order.
pub async fn compare_apps(
    State(app_state): State<AppState>,
    Json(payload): Json<CompareRequest>,
) -> Result<Json<Vec<ProductReport>>, AppError> {
    let app_ids: Vec<String> = payload
        .app_ids
        .iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();
    if app_ids.is_empty() {
        return Err(AppError::BadRequest("app_ids must not be empty".to_string()));
    }
    if app_ids.len() > MAX_COMPARED_APPS {
        return Err(AppError::BadRequest(format!(
            "At most {MAX_COMPARED_APPS} apps can be compared at once"
        )));
    }

    let request = resolve_request(&app_state.config.fetch, payload.max_pages, payload.cutoff_days)?;
    let country = country_or_default(&app_state, payload.country.as_deref());
    info!(apps = app_ids.len(), %country, "Comparing apps");

    let catalog = AppStoreCatalog::new(app_state.appstore.clone(), &country);
    Ok(Json(compare_products(&catalog, &app_ids, request).await))
}
