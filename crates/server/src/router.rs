use super::{handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/api/jobs/appstore/start", post(handlers::start_appstore_job))
        .route(
            "/api/jobs/trustpilot/start",
            post(handlers::start_trustpilot_job),
        )
        .route("/api/jobs/status/{job_id}", get(handlers::job_status))
        .route("/api/jobs/result/{job_id}", get(handlers::job_result))
        .route("/api/reviews/appstore/stream", get(handlers::appstore_stream))
        .route(
            "/api/reviews/trustpilot/stream",
            get(handlers::trustpilot_stream),
        )
        .route("/api/analysis/sentiment", post(handlers::sentiment))
        .route("/api/analysis/keywords", post(handlers::keywords))
        .route("/api/analysis/themes", post(handlers::themes))
        .route(
            "/api/analysis/adjusted-metrics",
            post(handlers::adjusted_metrics),
        )
        .route("/api/analysis/versions", post(handlers::versions))
        .route("/api/analysis/problems", post(handlers::problems))
        .route("/api/compare", post(handlers::compare_apps))
        .route("/api/apps/search", get(handlers::search_apps))
        .route("/api/apps/{app_id}", get(handlers::get_app))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
