//! Jira connection profile.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// A named Jira connection profile from the configuration file.
///
/// The token is optional; when absent it is taken from the
/// `JIRA_PERSONAL_TOKEN` environment variable at resolution time.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// The name of this profile.
    ///
    /// Must be non-empty and unique across all profiles.
    pub name: String,

    /// The Jira base URL, e.g. `https://jira.example.com`.
    pub url: String,

    /// Personal access token used as the bearer credential.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Per-profile request timeout, overriding the global setting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Profile {
    /// Create a new profile without a token.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            token: None,
            timeout_secs: None,
        }
    }

    /// Attach a token to this profile.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Validate this profile.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` with details if validation fails.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError(
                "profile name cannot be empty".to_string(),
            ));
        }

        if self.name.contains(char::is_whitespace) {
            return Err(ConfigError::ValidationError(format!(
                "profile name '{}' cannot contain whitespace",
                self.name
            )));
        }

        if self.url.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': URL cannot be empty",
                self.name
            )));
        }

        if !self.url.starts_with("https://") && !self.url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': URL must start with http:// or https://",
                self.name
            )));
        }

        if matches!(&self.token, Some(token) if token.trim().is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': token cannot be empty",
                self.name
            )));
        }

        if self.timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': timeout_secs must be greater than zero",
                self.name
            )));
        }

        Ok(())
    }
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work() -> Profile {
        Profile::new("work", "https://jira.example.com")
    }

    #[test]
    fn test_valid_profile() {
        assert!(work().validate().is_ok());
        assert!(work().with_token("abc").validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let profile = Profile::new("", "https://jira.example.com");
        let result = profile.validate();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("name cannot be empty"));
    }

    #[test]
    fn test_whitespace_name_rejected() {
        let profile = Profile::new("my work", "https://jira.example.com");
        assert!(profile
            .validate()
            .unwrap_err()
            .to_string()
            .contains("cannot contain whitespace"));
    }

    #[test]
    fn test_invalid_url_scheme_rejected() {
        let profile = Profile::new("work", "jira.example.com");
        assert!(profile
            .validate()
            .unwrap_err()
            .to_string()
            .contains("must start with http"));
    }

    #[test]
    fn test_blank_token_rejected() {
        let profile = work().with_token(" ");
        assert!(profile
            .validate()
            .unwrap_err()
            .to_string()
            .contains("token cannot be empty"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut profile = work();
        profile.timeout_secs = Some(0);
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_debug_hides_token() {
        let profile = work().with_token("hunter2");
        assert!(!format!("{:?}", profile).contains("hunter2"));
    }

    #[test]
    fn test_profile_serialization() {
        let profile = work().with_token("abc");
        let toml_str = toml::to_string(&profile).unwrap();
        let parsed: Profile = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, profile);
    }
}
