//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup: the job registry, the source clients and the
//! problem classifier, all shared by every request handler.

use crate::config::AppConfig;
use revscope::providers::ai::{AiProvider, LocalAiProvider};
use revscope::{JobRegistry, ProblemClassifier};
use revscope_appstore::AppStoreClient;
use revscope_trustpilot::TrustpilotConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration, loaded from `config.yml`.
    pub config: Arc<AppConfig>,
    /// Background fetch jobs, kept for the life of the process.
    pub jobs: JobRegistry,
    pub appstore: AppStoreClient,
    /// Trustpilot sources are per-domain, so only their settings are shared.
    pub trustpilot: TrustpilotConfig,
    pub classifier: Arc<ProblemClassifier>,
}

/// Builds the shared application state from the configuration.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let appstore = AppStoreClient::new(config.appstore.to_client_config())?;
    let trustpilot = config.trustpilot.to_client_config();

    let enrichment = &config.enrichment;
    let provider: Option<Box<dyn AiProvider>> = match (&enrichment.api_url, &enrichment.api_key) {
        (Some(api_url), Some(api_key)) => {
            info!(%api_url, "Problem classification enabled");
            Some(Box::new(LocalAiProvider::with_timeout(
                api_url.clone(),
                Some(api_key.clone()),
                enrichment.model_name.clone(),
                Duration::from_secs(enrichment.timeout_secs),
            )?))
        }
        _ => {
            info!("No enrichment credentials; problem classification disabled");
            None
        }
    };
    let classifier = ProblemClassifier::new(provider)
        .with_batch_size(enrichment.batch_size)
        .with_max_concurrency(enrichment.max_concurrency);

    Ok(AppState {
        config: Arc::new(config),
        jobs: JobRegistry::new(),
        appstore,
        trustpilot,
        classifier: Arc::new(classifier),
    })
}
