//! Application settings configuration.

use serde::{Deserialize, Serialize};

use super::DEFAULT_TIMEOUT_SECS;

/// Application-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The name of the default profile to use.
    pub default_profile: Option<String>,
    /// Request timeout in seconds, unless a profile overrides it.
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_profile: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
