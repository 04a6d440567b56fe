//! Feed API client error types.

use crate::config::ConfigError;

/// Errors from the HTTP transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Request failed (connection refused, timeout, broken response stream, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a status the status policy does not accept
    #[error("HTTP {method} {url}: bad HTTP status {status}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },

    /// Authorization value is not a valid header value
    #[error("invalid authorization header value")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl TransportError {
    /// HTTP status of a rejected response, if that is what failed.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Http(e) => e.status().map(|s| s.as_u16()),
            TransportError::InvalidHeader(_) => None,
        }
    }
}

/// Errors from feed client operations.
#[derive(Debug, thiserror::Error)]
pub enum FeedApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Response body is not valid JSON for the expected shape
    #[error("JSON decode error: {message}")]
    Decode {
        message: String,
        body: Option<String>,
    },

    /// Request payload could not be serialized
    #[error("JSON encode error: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
