//! # bidgate-billing
//!
//! Client for the billing provider's REST API (Stripe) and verification of
//! its signed webhooks.
//!
//! Requests are form-encoded and authenticated with the secret key as a
//! bearer token. Subscription status is never cached; callers ask the
//! provider each time.

mod checkout;
mod customers;
mod error;
mod http;
mod subscriptions;
pub mod webhook;

pub use checkout::CheckoutParams;
pub use customers::NewCustomer;
pub use error::BillingError;
pub use webhook::{WebhookEvent, construct_event, verify_signature};

use std::time::Duration;

use crate::http::{Form, check_response};

/// Default provider API origin.
pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Authenticated billing provider client.
#[derive(Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl StripeClient {
    /// Create a client for `api_base` (normally [`DEFAULT_API_BASE`]).
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::Http`] if the underlying `reqwest::Client` fails to build.
    pub fn new(api_base: &str, secret_key: &str, timeout: Duration) -> Result<Self, BillingError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("bidgate/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            secret_key: secret_key.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{path}", self.api_base)
    }

    async fn post_form<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        form: &Form,
    ) -> Result<T, BillingError> {
        let resp = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.secret_key)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(form.encode())
            .send()
            .await?;
        Ok(check_response(resp).await?.json::<T>().await?)
    }
}
