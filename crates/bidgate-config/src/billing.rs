//! Billing provider configuration.

use serde::{Deserialize, Serialize};

fn default_api_base() -> String {
    String::from("https://api.stripe.com")
}

/// Free trial granted on every new subscription, in days.
const fn default_trial_days() -> u32 {
    14
}

const fn default_timeout_secs() -> u64 {
    15
}

/// Accepted clock skew for webhook signatures, in seconds.
const fn default_webhook_tolerance_secs() -> u64 {
    300
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BillingConfig {
    /// Secret API key.
    #[serde(default)]
    pub secret_key: String,

    /// The single subscription price offered at checkout.
    #[serde(default)]
    pub price_id: String,

    /// Signing secret for incoming webhook events.
    #[serde(default)]
    pub webhook_secret: String,

    /// API base URL. Overridable for tests.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_trial_days")]
    pub trial_days: u32,

    /// Redirect after a completed checkout. Relative paths are joined to `server.app_url`.
    #[serde(default)]
    pub success_url: String,

    /// Redirect after an abandoned checkout.
    #[serde(default)]
    pub cancel_url: String,

    /// Where the customer portal returns to.
    #[serde(default)]
    pub portal_return_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_webhook_tolerance_secs")]
    pub webhook_tolerance_secs: u64,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            price_id: String::new(),
            webhook_secret: String::new(),
            api_base: default_api_base(),
            trial_days: default_trial_days(),
            success_url: String::new(),
            cancel_url: String::new(),
            portal_return_url: String::new(),
            timeout_secs: default_timeout_secs(),
            webhook_tolerance_secs: default_webhook_tolerance_secs(),
        }
    }
}

impl BillingConfig {
    /// Check if checkout can be offered.
    pub fn is_configured(&self) -> bool {
        !self.secret_key.is_empty() && !self.price_id.is_empty()
    }

    /// Check if incoming webhooks can be verified.
    pub fn has_webhook_secret(&self) -> bool {
        !self.webhook_secret.is_empty()
    }
}
