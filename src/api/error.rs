//! API error types for the Jira client.

use std::collections::BTreeMap;
use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur when interacting with the Jira API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Jira answered with a non-2xx status.
    #[error("HTTP {status}: {details}")]
    Http {
        /// The response status.
        status: StatusCode,
        /// Error payload reported by the server.
        details: ErrorDetails,
    },

    /// Network or HTTP transport error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A 2xx response whose body could not be decoded.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// The configured base URL is not a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The client was constructed with unusable settings.
    #[error("{0}")]
    Config(#[from] ConfigError),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from an HTTP status code and server payload.
    pub fn from_status(status: StatusCode, details: ErrorDetails) -> Self {
        ApiError::Http { status, details }
    }

    /// The HTTP status, if this error came from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Server-provided error details, if any.
    pub fn details(&self) -> Option<&ErrorDetails> {
        match self {
            ApiError::Http { details, .. } => Some(details),
            _ => None,
        }
    }

    /// 401: the token was rejected.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// 403: the token is valid but lacks permission.
    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(StatusCode::FORBIDDEN)
    }

    /// 404: the resource does not exist or is not visible.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// 429: the server is throttling requests.
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(StatusCode::TOO_MANY_REQUESTS)
    }

    /// 5xx: the server failed.
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| s.is_server_error())
    }
}

/// Error payload of a failed Jira request.
///
/// Jira reports failures as `{"errorMessages": [...], "errors": {field: msg}}`.
/// Both parts may be empty when the body is not Jira's error JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    /// The request URL.
    #[serde(skip)]
    pub url: String,
    /// General error messages.
    #[serde(default)]
    pub error_messages: Vec<String>,
    /// Errors keyed by field id.
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
}

impl ErrorDetails {
    /// Parse the error body of a response to `url`.
    ///
    /// Bodies that are not Jira error JSON produce empty message lists.
    pub fn parse(url: &str, body: &str) -> Self {
        let mut details = serde_json::from_str::<ErrorDetails>(body).unwrap_or_default();
        details.url = url.to_string();
        details
    }

    /// Whether the server supplied any message at all.
    pub fn is_empty(&self) -> bool {
        self.error_messages.is_empty() && self.errors.is_empty()
    }
}

impl fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "{}", self.url);
        }

        let mut parts: Vec<String> = self.error_messages.clone();
        parts.extend(self.errors.iter().map(|(k, v)| format!("{}: {}", k, v)));
        write!(f, "{}", parts.join(", "))
    }
}
