//! # Application Configuration
//!
//! This module defines the configuration structure for the `revscope-server`
//! and the logic for loading it from a `config.yml` file and environment
//! variables. Every key has a programmatic default, so the server also starts
//! with no configuration file at all.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use revscope_appstore::AppStoreConfig;
use revscope_trustpilot::TrustpilotConfig;
use serde::Deserialize;
use std::env;
use std::fs;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::info;

static ENV_VAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}").expect("env substitution pattern is a valid regex")
});

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates an explicitly requested configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub appstore: AppStoreSettings,
    #[serde(default)]
    pub trustpilot: TrustpilotSettings,
    /// Defaults applied to fetch requests that leave a parameter out.
    #[serde(default)]
    pub fetch: FetchDefaults,
    #[serde(default)]
    pub enrichment: EnrichmentSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            appstore: AppStoreSettings::default(),
            trustpilot: TrustpilotSettings::default(),
            fetch: FetchDefaults::default(),
            enrichment: EnrichmentSettings::default(),
        }
    }
}

fn default_port() -> u16 {
    8000
}

/// Endpoints of the App Store feed, lookup and search APIs.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppStoreSettings {
    pub base_url: String,
    pub lookup_url: String,
    pub search_url: String,
    pub timeout_secs: u64,
}

impl Default for AppStoreSettings {
    fn default() -> Self {
        let defaults = AppStoreConfig::default();
        Self {
            base_url: defaults.base_url,
            lookup_url: defaults.lookup_url,
            search_url: defaults.search_url,
            timeout_secs: defaults.timeout.as_secs(),
        }
    }
}

impl AppStoreSettings {
    pub fn to_client_config(&self) -> AppStoreConfig {
        AppStoreConfig {
            base_url: self.base_url.clone(),
            lookup_url: self.lookup_url.clone(),
            search_url: self.search_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Hosts tried, in order, for Trustpilot review pages.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TrustpilotSettings {
    pub localized_base_url: String,
    pub fallback_base_url: String,
    pub timeout_secs: u64,
}

impl Default for TrustpilotSettings {
    fn default() -> Self {
        let defaults = TrustpilotConfig::default();
        Self {
            localized_base_url: defaults.localized_base_url,
            fallback_base_url: defaults.fallback_base_url,
            timeout_secs: defaults.timeout.as_secs(),
        }
    }
}

impl TrustpilotSettings {
    pub fn to_client_config(&self) -> TrustpilotConfig {
        TrustpilotConfig {
            localized_base_url: self.localized_base_url.clone(),
            fallback_base_url: self.fallback_base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FetchDefaults {
    pub default_country: String,
    pub default_max_pages: u32,
    pub default_cutoff_days: i64,
}

impl Default for FetchDefaults {
    fn default() -> Self {
        Self {
            default_country: "it".to_string(),
            default_max_pages: 10,
            default_cutoff_days: 365,
        }
    }
}

/// The OpenAI-compatible endpoint used for problem classification.
///
/// Classification is disabled when `api_url` or `api_key` is missing.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EnrichmentSettings {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub batch_size: usize,
    pub max_concurrency: usize,
    pub timeout_secs: u64,
}

impl Default for EnrichmentSettings {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            model_name: None,
            batch_size: revscope::enrichment::DEFAULT_BATCH_SIZE,
            max_concurrency: revscope::enrichment::DEFAULT_MAX_CONCURRENCY,
            timeout_secs: 30,
        }
    }
}

// Reads a file and substitutes `${VAR}` references from the environment.
// Returns Ok(None) if the file does not exist.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let expanded = ENV_VAR_RE.replace_all(&content, |caps: &regex::Captures| {
        env::var(&caps["var"]).unwrap_or_default()
    });

    Ok(Some(expanded.into_owned()))
}

// Substituted-but-unset variables leave empty strings behind.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Loads the application configuration from a file and environment variables.
///
/// - `config.yml` next to the crate manifest is optional; an explicit
///   `config_path_override` must exist.
/// - `PORT` overrides the top-level port.
/// - Nested keys are overridden by `REVSCOPE_...` variables
///   (e.g., `REVSCOPE_TRUSTPILOT__TIMEOUT_SECS`).
/// - `ENRICHMENT_API_KEY` fills in the enrichment key when the file leaves it empty.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder();

    match config_path_override {
        Some(path) => {
            let content = read_and_substitute(path)?.ok_or_else(|| {
                ConfigError::NotFound(format!("Config file not found at '{path}'."))
            })?;
            info!("Loading configuration from '{path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None => {
            let default_path = format!("{}/config.yml", env!("CARGO_MANIFEST_DIR"));
            if let Some(content) = read_and_substitute(&default_path)? {
                info!("Loading configuration from '{default_path}'.");
                builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
            } else {
                info!("No config.yml found; using built-in defaults.");
            }
        }
    }

    if let Ok(port) = env::var("PORT") {
        builder = builder.set_override("port", port)?;
    }

    let settings = builder
        .add_source(
            Environment::with_prefix("REVSCOPE")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    config.enrichment.api_url = non_empty(config.enrichment.api_url);
    config.enrichment.model_name = non_empty(config.enrichment.model_name);
    config.enrichment.api_key =
        non_empty(config.enrichment.api_key).or_else(|| non_empty(env::var("ENRICHMENT_API_KEY").ok()));

    Ok(config)
}
