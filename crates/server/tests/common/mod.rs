//! # Common Test Utilities
//!
//! `TestApp` spawns the real router on a random port with every upstream (App
//! Store, both Trustpilot hosts, the enrichment endpoint) replaced by a
//! `wiremock::MockServer`.

// Not every test file uses every helper.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use reqwest::Client;
use revscope_server::{
    config::AppConfig,
    router,
    state::{build_app_state, AppState},
};
use serde_json::Value;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
use wiremock::MockServer;

pub const CHAT_PATH: &str = "/v1/chat/completions";

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub appstore: MockServer,
    pub trustpilot: MockServer,
    pub trustpilot_fallback: MockServer,
    pub ai: MockServer,
    pub app_state: AppState,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the server with problem classification disabled.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(|_| {}).await
    }

    /// Spawns the server with problem classification pointed at the `ai` mock.
    pub async fn spawn_with_enrichment() -> Result<Self> {
        Self::spawn_with(|config| {
            config.enrichment.api_key = Some("test-key".to_string());
            config.enrichment.model_name = Some("mock-chat-model".to_string());
            config.enrichment.batch_size = 2;
        })
        .await
    }

    pub async fn spawn_with(customize: impl FnOnce(&mut AppConfig)) -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .with_test_writer()
            .try_init();

        let appstore = MockServer::start().await;
        let trustpilot = MockServer::start().await;
        let trustpilot_fallback = MockServer::start().await;
        let ai = MockServer::start().await;

        let mut config = AppConfig::default();
        config.port = 0;
        config.appstore.base_url = appstore.uri();
        config.appstore.lookup_url = format!("{}/lookup", appstore.uri());
        config.appstore.search_url = format!("{}/search", appstore.uri());
        config.appstore.timeout_secs = 5;
        config.trustpilot.localized_base_url = trustpilot.uri();
        config.trustpilot.fallback_base_url = trustpilot_fallback.uri();
        config.trustpilot.timeout_secs = 5;
        config.enrichment.api_url = Some(format!("{}{CHAT_PATH}", ai.uri()));
        customize(&mut config);

        let app_state = build_app_state(config).await?;
        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            appstore,
            trustpilot,
            trustpilot_fallback,
            ai,
            app_state: app_state_for_harness,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.address)
    }

    /// Polls the status endpoint until the job leaves `pending`/`running`.
    pub async fn wait_for_job(&self, job_id: &str) -> Result<Value> {
        for _ in 0..200 {
            let status: Value = self
                .client
                .get(self.url(&format!("/api/jobs/status/{job_id}")))
                .send()
                .await?
                .json()
                .await?;
            if matches!(status["status"].as_str(), Some("done") | Some("error")) {
                return Ok(status);
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        anyhow::bail!("job {job_id} did not finish in time")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// One parsed Server-Sent Event.
#[derive(Debug, Clone)]
pub struct SseEvent {
    pub event: String,
    pub data: Value,
}

/// Splits a complete `text/event-stream` body into its events, skipping
/// keep-alive comments.
pub fn parse_sse(body: &str) -> Vec<SseEvent> {
    body.split("\n\n")
        .filter_map(|block| {
            let mut event = None;
            let mut data = String::new();
            for line in block.lines() {
                if let Some(name) = line.strip_prefix("event:") {
                    event = Some(name.trim().to_string());
                } else if let Some(chunk) = line.strip_prefix("data:") {
                    data.push_str(chunk.trim_start());
                }
            }
            let event = event?;
            Some(SseEvent {
                event,
                data: serde_json::from_str(&data).unwrap_or(Value::Null),
            })
        })
        .collect()
}

/// The App Store feed path for app `id` in the `it` storefront.
pub fn feed_path(id: &str, page: u32) -> String {
    format!("/it/rss/customerreviews/page={page}/id={id}/sortBy=mostRecent/json")
}
