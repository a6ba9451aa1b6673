use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContextEqError {
    #[error("Backend returned {status} for {operation}: {body}")]
    BackendStatus {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("Backend returned an unexpected payload for {operation}: {reason}")]
    UnexpectedResponse {
        operation: &'static str,
        reason: String,
    },

    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: String },

    #[error("Unknown metric '{0}', expected one of CTR, Retention, ROAS")]
    InvalidMetric(String),

    #[error("Invalid timestamp '{0}', expected mm:ss")]
    InvalidTimestamp(String),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ContextEqError>;
