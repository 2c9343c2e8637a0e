//! Authentication handling for the Jira API.
//!
//! Jira Server/Data Center accepts personal access tokens as bearer
//! credentials. The token is supplied by the caller; this module only turns
//! it into a header value and keeps it out of debug output.

use std::fmt;

use reqwest::header::HeaderValue;

use super::error::{ApiError, Result};

/// Bearer credentials for Jira.
#[derive(Clone)]
pub struct Auth {
    /// The complete `Bearer ...` header value.
    header: HeaderValue,
}

impl Auth {
    /// Create bearer credentials from a personal access token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the token contains characters that are
    /// not allowed in an HTTP header.
    pub fn bearer(token: &str) -> Result<Self> {
        let mut header = HeaderValue::from_str(&build_auth_header(token)).map_err(|_| {
            ApiError::Config(crate::config::ConfigError::ValidationError(
                "token contains characters that are not valid in an HTTP header".to_string(),
            ))
        })?;
        header.set_sensitive(true);
        Ok(Self { header })
    }

    /// Get the authorization header value for HTTP requests.
    pub fn header_value(&self) -> &HeaderValue {
        &self.header
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth").field("scheme", &"Bearer").finish()
    }
}

/// Build the bearer header value.
fn build_auth_header(token: &str) -> String {
    format!("Bearer {}", token.trim())
}
