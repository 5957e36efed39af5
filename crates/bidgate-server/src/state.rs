//! Shared handler state built once from configuration.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use bidgate_analysis::Dispatcher;
use bidgate_billing::StripeClient;
use bidgate_config::{BidgateConfig, BillingConfig, WorkflowConfig};
use bidgate_store::RecordStore;

use crate::error::ApiError;

/// Billing client plus the settings checkout and webhooks need.
#[derive(Clone)]
pub struct Billing {
    pub client: StripeClient,
    pub config: Arc<BillingConfig>,
}

/// Analysis dispatcher plus its text cap.
#[derive(Clone)]
pub struct Analysis {
    pub dispatcher: Dispatcher,
    pub max_text_chars: usize,
}

/// Cloned into every handler. Holds no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub store: RecordStore,
    pub billing: Option<Billing>,
    pub analysis: Option<Analysis>,
    pub app_url: Arc<str>,
}

impl AppState {
    /// Build upstream clients for every configured integration.
    ///
    /// # Errors
    ///
    /// Fails when an HTTP client cannot be built.
    pub fn from_config(config: &BidgateConfig) -> anyhow::Result<Self> {
        let store = RecordStore::new(
            &config.record_store.base_url,
            &config.record_store.api_token,
            Duration::from_secs(config.record_store.timeout_secs),
        )
        .context("failed to build record store client")?;

        let billing = if config.billing.is_configured() {
            Some(build_billing(&config.billing)?)
        } else {
            tracing::warn!("billing is not configured; /stripe routes will fail");
            None
        };

        let analysis = if config.workflow.is_configured() {
            Some(build_analysis(&config.workflow)?)
        } else {
            tracing::warn!("workflow webhook is not configured; /bidgate/analyse will fail");
            None
        };

        Ok(Self {
            store,
            billing,
            analysis,
            app_url: Arc::from(config.server.app_url.trim_end_matches('/')),
        })
    }

    /// # Errors
    ///
    /// [`ApiError::NotConfigured`] when billing is disabled.
    pub fn billing(&self) -> Result<&Billing, ApiError> {
        self.billing
            .as_ref()
            .ok_or(ApiError::NotConfigured("Billing"))
    }

    /// # Errors
    ///
    /// [`ApiError::NotConfigured`] when the workflow webhook is disabled.
    pub fn analysis(&self) -> Result<&Analysis, ApiError> {
        self.analysis
            .as_ref()
            .ok_or(ApiError::NotConfigured("Document analysis"))
    }

    /// Resolve a configured redirect against the app URL.
    ///
    /// Empty values use `fallback_path`; values starting with `/` are joined
    /// to the app URL; anything else is used as is.
    #[must_use]
    pub fn app_link(&self, configured: &str, fallback_path: &str) -> String {
        let configured = configured.trim();
        if configured.is_empty() {
            format!("{}{fallback_path}", self.app_url)
        } else if configured.starts_with('/') {
            format!("{}{configured}", self.app_url)
        } else {
            configured.to_string()
        }
    }
}

fn build_billing(config: &BillingConfig) -> anyhow::Result<Billing> {
    let client = StripeClient::new(
        &config.api_base,
        &config.secret_key,
        Duration::from_secs(config.timeout_secs),
    )
    .context("failed to build billing client")?;
    Ok(Billing {
        client,
        config: Arc::new(config.clone()),
    })
}

fn build_analysis(config: &WorkflowConfig) -> anyhow::Result<Analysis> {
    let dispatcher = Dispatcher::new(
        &config.webhook_url,
        Duration::from_secs(config.timeout_secs),
    )
    .context("failed to build workflow client")?;
    Ok(Analysis {
        dispatcher,
        max_text_chars: config.max_text_chars,
    })
}
