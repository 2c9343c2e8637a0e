//! Configuration management for jira-dc.
//!
//! This module holds the connection configuration consumed by the client
//! and the on-disk configuration file (profiles and settings) used by the
//! `jiradc` binary.

mod client;
mod profile;
mod settings;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use client::{ClientConfig, DEFAULT_TIMEOUT_SECS};
pub use profile::Profile;
pub use settings::Settings;

/// Environment variable holding the Jira base URL.
pub const URL_ENV: &str = "JIRA_URL";

/// Environment variable holding the personal access token.
pub const TOKEN_ENV: &str = "JIRA_PERSONAL_TOKEN";

/// Name of the ad-hoc profile built from environment variables.
pub const ENV_PROFILE_NAME: &str = "env";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// The configuration file could not be read.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[source] std::io::Error),

    /// The configuration file is not valid TOML for this schema.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A value failed validation.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// The requested profile does not exist.
    #[error("Profile '{0}' not found")]
    ProfileNotFound(String),

    /// No token was configured for the profile and none is in the environment.
    #[error("No token for profile '{0}': set `token` in the profile or JIRA_PERSONAL_TOKEN")]
    MissingToken(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The configuration file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Application-wide settings.
    #[serde(default)]
    pub settings: Settings,
    /// Connection profiles.
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

impl Config {
    /// Default path of the configuration file.
    ///
    /// `<config_dir>/jiradc/config.toml`, e.g. `~/.config/jiradc/config.toml`
    /// on Linux.
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("jiradc").join("config.toml"))
    }

    /// Load the configuration from the default path.
    ///
    /// A missing file yields an empty configuration so that environment-only
    /// setups keep working.
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load and validate the configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config = Self::parse(&contents)?;
        debug!(
            path = %path.display(),
            profiles = config.profiles.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every profile and check profile names are unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for profile in &self.profiles {
            profile.validate()?;
            if !seen.insert(profile.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate profile name '{}'",
                    profile.name
                )));
            }
        }

        if let Some(default) = &self.settings.default_profile {
            if !self.profiles.iter().any(|p| &p.name == default) {
                return Err(ConfigError::ProfileNotFound(default.clone()));
            }
        }

        Ok(())
    }

    /// Find a profile by name.
    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Resolve the client configuration to use.
    ///
    /// Resolution order:
    /// 1. The explicitly requested profile.
    /// 2. `JIRA_URL` + `JIRA_PERSONAL_TOKEN` from the environment.
    /// 3. The `default_profile` setting.
    /// 4. The only profile, when exactly one is configured.
    pub fn resolve(&self, requested: Option<&str>) -> Result<ClientConfig> {
        let env_token = std::env::var(TOKEN_ENV).ok().filter(|t| !t.is_empty());

        let profile = match requested {
            Some(name) => self
                .profile(name)
                .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))?,
            None => {
                if let (Ok(url), Some(token)) = (std::env::var(URL_ENV), env_token.as_deref()) {
                    debug!("Using connection settings from environment");
                    let profile = Profile::new(ENV_PROFILE_NAME, url);
                    profile.validate()?;
                    return Ok(self.client_config(&profile, token));
                }

                let name = match (&self.settings.default_profile, self.profiles.as_slice()) {
                    (Some(name), _) => name.clone(),
                    (None, [only]) => only.name.clone(),
                    (None, []) => {
                        return Err(ConfigError::ValidationError(format!(
                            "no profiles configured; create {} or set {URL_ENV} and {TOKEN_ENV}",
                            Self::default_path()
                                .map(|p| p.display().to_string())
                                .unwrap_or_else(|_| "a configuration file".to_string())
                        )))
                    }
                    (None, _) => {
                        return Err(ConfigError::ValidationError(
                            "several profiles configured; pass --profile or set default_profile"
                                .to_string(),
                        ))
                    }
                };
                self.profile(&name)
                    .ok_or(ConfigError::ProfileNotFound(name))?
            }
        };

        let token = profile
            .token
            .as_deref()
            .or(env_token.as_deref())
            .ok_or_else(|| ConfigError::MissingToken(profile.name.clone()))?;

        Ok(self.client_config(profile, token))
    }

    fn client_config(&self, profile: &Profile, token: &str) -> ClientConfig {
        let timeout = profile.timeout_secs.unwrap_or(self.settings.timeout_secs);
        ClientConfig::new(&profile.url, token)
            .with_timeout(std::time::Duration::from_secs(timeout))
    }
}
