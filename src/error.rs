//! Centralized error types for the `jiradc` binary.
//!
//! Library operations return [`ApiError`] or [`ConfigError`]; this module
//! aggregates them and turns them into messages fit for a terminal.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (file system, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file exists and is readable."
                        .to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
                ConfigError::ProfileNotFound(name) => format!("Profile '{}' not found.", name),
                ConfigError::MissingToken(name) => {
                    format!("No personal access token for profile '{}'.", name)
                }
            },
            AppError::Api(e) => Self::api_message(e),
            AppError::Io(_) => {
                "A file operation failed. Please check file permissions.".to_string()
            }
            AppError::Other(msg) => msg.clone(),
        }
    }

    fn api_message(e: &ApiError) -> String {
        if e.is_unauthorized() {
            return "Authentication failed. Please check your personal access token.".to_string();
        }
        if e.is_forbidden() {
            return "Access denied. You don't have permission to access this resource."
                .to_string();
        }
        if e.is_not_found() {
            return format!("Not found: {}", Self::details_or(e, "resource"));
        }
        if e.is_rate_limited() {
            return "Too many requests. Please wait a moment and try again.".to_string();
        }
        if e.is_server_error() {
            return "Jira server error. Please try again later.".to_string();
        }

        match e {
            ApiError::Http { details, .. } => format!("Request rejected: {}", details),
            ApiError::Network(_) => {
                "Connection failed. Please check the Jira URL and your network.".to_string()
            }
            ApiError::InvalidUrl(_) => "Invalid Jira URL in configuration.".to_string(),
            ApiError::InvalidResponse(_) => {
                "Unexpected response from Jira. Please try again.".to_string()
            }
            ApiError::Config(c) => format!("Configuration error: {}", c),
        }
    }

    fn details_or(e: &ApiError, fallback: &str) -> String {
        e.details()
            .map(|d| d.to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Check if this error is critical, i.e. retrying cannot help.
    pub fn is_critical(&self) -> bool {
        match self {
            AppError::Config(_) => true,
            AppError::Api(e) => {
                matches!(e, ApiError::Config(_) | ApiError::InvalidUrl(_))
                    || e.is_unauthorized()
                    || e.is_forbidden()
            }
            _ => false,
        }
    }

    /// Process exit code for this error: 2 when retrying cannot help, 1
    /// otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_critical() {
            2
        } else {
            1
        }
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::NoConfigDir)
            | AppError::Config(ConfigError::ReadError(_)) => {
                Some("Create ~/.config/jiradc/config.toml or set JIRA_URL and JIRA_PERSONAL_TOKEN.")
            }
            AppError::Config(ConfigError::MissingToken(_)) => {
                Some("Add `token` to the profile or set JIRA_PERSONAL_TOKEN.")
            }
            AppError::Api(e) if e.is_unauthorized() => {
                Some("Create a new personal access token in your Jira profile settings.")
            }
            AppError::Api(e) if e.is_rate_limited() => Some("Wait a few seconds and try again."),
            AppError::Api(ApiError::Network(_)) => {
                Some("Check your network connection and the Jira URL.")
            }
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
