//! Connection configuration shared by every sub-client.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use super::{ConfigError, Result};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for a Jira Server/Data Center instance.
///
/// Each sub-client receives its own copy of this value; nothing in it is
/// shared or mutated after construction.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    token: String,
    timeout: Duration,
    headers: BTreeMap<String, String>,
}

impl ClientConfig {
    /// Create a configuration from a base URL and a personal access token.
    ///
    /// Trailing slashes are trimmed from the URL. Nothing is validated here;
    /// see [`ClientConfig::validate`].
    pub fn new(base_url: impl AsRef<str>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.as_ref().trim().trim_end_matches('/').to_string(),
            token: token.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            headers: BTreeMap::new(),
        }
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a header sent with every request.
    ///
    /// `Authorization` and `Content-Type` are always set by the transport and
    /// cannot be overridden here.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// The normalized base URL, e.g. `https://jira.example.com`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Extra headers sent with every request.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Check that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if the base URL is empty or not
    /// an http(s) URL, the token is empty, or the timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "base URL cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "base URL '{}' must start with http:// or https://",
                self.base_url
            )));
        }

        if self.token.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "token cannot be empty".to_string(),
            ));
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slashes() {
        let config = ClientConfig::new("https://jira.example.com///", "t");
        assert_eq!(config.base_url(), "https://jira.example.com");
    }

    #[test]
    fn test_new_preserves_context_path() {
        let config = ClientConfig::new("https://example.com/jira/", "t");
        assert_eq!(config.base_url(), "https://example.com/jira");
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("https://jira.example.com", "t");
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.headers().is_empty());
    }

    #[test]
    fn test_builder_setters() {
        let config = ClientConfig::new("https://jira.example.com", "t")
            .with_timeout(Duration::from_secs(5))
            .with_header("X-Trace", "1");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.headers().get("X-Trace"), Some(&"1".to_string()));
    }

    #[test]
    fn test_valid_config() {
        assert!(ClientConfig::new("https://jira.example.com", "t")
            .validate()
            .is_ok());
        assert!(ClientConfig::new("http://localhost:8080", "t")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_empty_url_rejected() {
        let err = ClientConfig::new("", "t").validate().unwrap_err();
        assert!(err.to_string().contains("base URL cannot be empty"));
    }

    #[test]
    fn test_bad_scheme_rejected() {
        let err = ClientConfig::new("jira.example.com", "t")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("must start with http"));
    }

    #[test]
    fn test_empty_token_rejected() {
        let err = ClientConfig::new("https://jira.example.com", "  ")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("token cannot be empty"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = ClientConfig::new("https://jira.example.com", "t")
            .with_timeout(Duration::ZERO)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_debug_hides_token() {
        let config = ClientConfig::new("https://jira.example.com", "super_secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super_secret"));
        assert!(debug.contains("jira.example.com"));
    }
}
