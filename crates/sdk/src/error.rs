//! Error types for the management API client.

use serde::Deserialize;

/// Result type for SDK operations.
pub type AmbariResult<T> = Result<T, AmbariError>;

/// Error types that can occur when talking to the management API.
#[derive(Debug, thiserror::Error)]
pub enum AmbariError {
    /// The request never produced a response (connection refused, DNS, TLS, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Response body could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A lookup came back empty or failed, meaning the resource is not there.
    #[error("{0}")]
    NotFound(String),

    /// Both the primary and the fallback attempt failed.
    #[error("{primary}; fallback also failed: {fallback}")]
    FallbackFailed {
        primary: Box<AmbariError>,
        fallback: Box<AmbariError>,
    },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl AmbariError {
    /// Create an API error from a status code and response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(error_response) => error_response.message,
            Err(_) if body.trim().is_empty() => "empty response body".to_string(),
            Err(_) => body.trim().to_string(),
        };
        Self::Api { status, message }
    }

    /// HTTP status of the failed call, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_)) || self.status() == Some(404)
    }
}

/// Error body returned by the management API.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub status: Option<u16>,
    pub message: String,
}
