//! # bidgate-config
//!
//! Layered configuration loading for bidgate using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`BIDGATE_*` prefix, `__` as separator)
//! 2. An explicit config file (`--config`), or `./bidgate.toml`
//! 3. User-level `~/.config/bidgate/config.toml`
//! 4. Built-in defaults
//!
//! No credential has a built-in default. Secrets must come from a file or the
//! environment.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `BIDGATE_RECORD_STORE__API_TOKEN` -> `record_store.api_token`,
//! `BIDGATE_BILLING__SECRET_KEY` -> `billing.secret_key`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use bidgate_config::BidgateConfig;
//!
//! let config = BidgateConfig::load_with_dotenv(None).expect("config");
//! config.validate().expect("record store configured");
//! println!("listening on {}", config.server.bind_address());
//! ```

mod billing;
mod error;
mod record_store;
mod server;
mod workflow;

pub use billing::BillingConfig;
pub use error::ConfigError;
pub use record_store::RecordStoreConfig;
pub use server::ServerConfig;
pub use workflow::WorkflowConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "BIDGATE_";
const LOCAL_CONFIG_FILE: &str = "bidgate.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BidgateConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub record_store: RecordStoreConfig,
    #[serde(default)]
    pub billing: BillingConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

impl BidgateConfig {
    /// Load configuration from defaults, TOML files, and environment variables.
    ///
    /// `config_path` replaces the project-local `bidgate.toml` when given.
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be read or a value
    /// has the wrong type.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(config_path).extract().map_err(ConfigError::from)
    }

    /// Load `.env` from the current directory, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(config_path)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    pub fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: explicit or project-local config
        let local_path =
            config_path.map_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE), Path::to_path_buf);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check the sections the server cannot run without.
    ///
    /// Billing and the workflow engine are optional; their routes report an
    /// error when unconfigured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] for a missing record store, or
    /// [`ConfigError::InvalidValue`] for a malformed URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.record_store.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "record_store".into(),
            });
        }
        check_http_url("record_store.base_url", &self.record_store.base_url)?;
        check_http_url("server.app_url", &self.server.app_url)?;
        if self.workflow.is_configured() {
            check_http_url("workflow.webhook_url", &self.workflow.webhook_url)?;
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("bidgate").join("config.toml"))
    }
}

fn check_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.into(),
            reason: format!("expected an http(s) URL, got '{value}'"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_credentials() {
        let config = BidgateConfig::default();
        assert!(!config.record_store.is_configured());
        assert!(!config.billing.is_configured());
        assert!(!config.workflow.is_configured());
        assert!(config.billing.secret_key.is_empty());
    }

    #[test]
    fn validate_requires_record_store() {
        let err = BidgateConfig::default().validate().unwrap_err();
        assert!(matches!(err, ConfigError::NotConfigured { section } if section == "record_store"));
    }

    #[test]
    fn validate_rejects_non_http_urls() {
        let mut config = BidgateConfig::default();
        config.record_store.base_url = "ftp://example.test".into();
        config.record_store.api_token = "token".into();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field, .. } if field == "record_store.base_url"));
    }

    #[test]
    fn validate_accepts_minimal_config() {
        let mut config = BidgateConfig::default();
        config.record_store.base_url = "https://example.test/api/1.1".into();
        config.record_store.api_token = "token".into();
        assert!(config.validate().is_ok());
    }
}
