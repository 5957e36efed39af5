use bidgate_core::enums::SubscriptionStatus;
use serde::Deserialize;

use crate::http::check_response;
use crate::{BillingError, StripeClient};

#[derive(Deserialize)]
struct SubscriptionList {
    #[serde(default)]
    data: Vec<Subscription>,
}

#[derive(Deserialize)]
struct Subscription {
    status: String,
}

impl StripeClient {
    /// Status of the customer's most recent subscription, in any state.
    ///
    /// `None` when the customer has no subscriptions or the provider reports
    /// a status this crate does not know.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError`] if the request fails or is rejected.
    pub async fn latest_subscription_status(
        &self,
        customer_id: &str,
    ) -> Result<Option<SubscriptionStatus>, BillingError> {
        let url = format!(
            "{}?customer={}&status=all&limit=1",
            self.url("subscriptions"),
            urlencoding::encode(customer_id)
        );
        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.secret_key)
            .send()
            .await?;
        let list: SubscriptionList = check_response(resp).await?.json().await?;
        Ok(list
            .data
            .first()
            .and_then(|s| SubscriptionStatus::parse(&s.status)))
    }
}
