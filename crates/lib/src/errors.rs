use thiserror::Error;

/// Errors raised while fetching or decoding a single page from a review source.
///
/// Every variant is terminal for the run that hit it: the paginator records the
/// message as the stop reason and keeps whatever was accumulated so far.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("{0} not found")]
    NotFound(String),
    #[error("Invalid response: {0}")]
    Parse(String),
    #[error("{0}")]
    Blocked(String),
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(err.to_string())
    }
}

/// Errors returned by the background job registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    #[error("Job not found")]
    NotFound,
    #[error("Job not complete yet")]
    NotReady,
}

/// Errors raised by AI providers.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("API key is missing")]
    MissingApiKey,
}
