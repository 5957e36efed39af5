use serde::Deserialize;

use crate::http::Form;
use crate::{BillingError, StripeClient};

/// A subscription checkout for one customer and one price.
#[derive(Debug, Clone)]
pub struct CheckoutParams<'a> {
    pub customer_id: &'a str,
    pub price_id: &'a str,
    pub trial_days: u32,
    pub user_id: &'a str,
    pub success_url: &'a str,
    pub cancel_url: &'a str,
}

#[derive(Deserialize)]
struct Session {
    #[serde(default)]
    url: Option<String>,
}

impl CheckoutParams<'_> {
    fn form(&self) -> Form {
        let form = Form::new()
            .field("mode", "subscription")
            .field("customer", self.customer_id)
            .field("line_items[0][price]", self.price_id)
            .field("line_items[0][quantity]", "1")
            .field("metadata[userId]", self.user_id)
            .field("subscription_data[metadata][userId]", self.user_id)
            .field("success_url", self.success_url)
            .field("cancel_url", self.cancel_url);
        if self.trial_days == 0 {
            form
        } else {
            form.field(
                "subscription_data[trial_period_days]",
                self.trial_days.to_string(),
            )
        }
    }
}

impl StripeClient {
    /// Create a hosted subscription checkout and return its redirect URL.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError`] if the request fails or the session has no URL.
    pub async fn create_checkout_session(
        &self,
        params: &CheckoutParams<'_>,
    ) -> Result<String, BillingError> {
        let session: Session = self.post_form("checkout/sessions", &params.form()).await?;
        session
            .url
            .ok_or_else(|| BillingError::Parse("checkout session missing 'url'".into()))
    }

    /// Create a customer self-service portal session and return its URL.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError`] if the request fails or the session has no URL.
    pub async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<String, BillingError> {
        let form = Form::new()
            .field("customer", customer_id)
            .field("return_url", return_url);
        let session: Session = self
            .post_form("billing_portal/sessions", &form)
            .await?;
        session
            .url
            .ok_or_else(|| BillingError::Parse("portal session missing 'url'".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(trial_days: u32) -> CheckoutParams<'static> {
        CheckoutParams {
            customer_id: "cus_1",
            price_id: "price_1",
            trial_days,
            user_id: "user_1",
            success_url: "https://app.test/billing?ok=1",
            cancel_url: "https://app.test/billing",
        }
    }

    #[test]
    fn checkout_form_has_single_line_item_and_trial() {
        let encoded = params(14).form().encode();
        assert!(encoded.contains("mode=subscription"));
        assert!(encoded.contains("line_items%5B0%5D%5Bprice%5D=price_1"));
        assert!(encoded.contains("line_items%5B0%5D%5Bquantity%5D=1"));
        assert!(encoded.contains("subscription_data%5Btrial_period_days%5D=14"));
        assert!(!encoded.contains("line_items%5B1%5D"));
    }

    #[test]
    fn zero_trial_is_omitted() {
        assert!(!params(0).form().encode().contains("trial_period_days"));
    }
}
