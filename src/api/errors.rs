//! User API error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("User API error (status {status}): {message}")]
    Status {
        status: u16,
        message: String,
    },

    #[error("User API rejected the request: {0}")]
    Rejected(String),

    #[error("Failed to parse user API response: {0}")]
    Parse(String),

    #[error("User '{0}' not found")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Parse(err.to_string())
    }
}
