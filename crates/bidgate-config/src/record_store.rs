//! Record store (no-code backend) configuration.

use serde::{Deserialize, Serialize};

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    15
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecordStoreConfig {
    /// Base URL of the data API, e.g. `https://app.example.com/api/1.1`.
    #[serde(default)]
    pub base_url: String,

    /// Static bearer token attached to every request.
    #[serde(default)]
    pub api_token: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RecordStoreConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RecordStoreConfig {
    /// Check if the record store config has the minimum required fields.
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty() && !self.api_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        assert!(!RecordStoreConfig::default().is_configured());
    }

    #[test]
    fn configured_when_url_and_token_set() {
        let config = RecordStoreConfig {
            base_url: "https://example.test/api/1.1".into(),
            api_token: "token".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
    }
}
