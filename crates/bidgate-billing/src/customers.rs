use serde::Deserialize;

use crate::http::Form;
use crate::{BillingError, StripeClient};

/// Details for a new billing customer.
#[derive(Debug, Clone, Default)]
pub struct NewCustomer<'a> {
    pub email: &'a str,
    pub name: Option<&'a str>,
    /// External auth-user id, stored as `metadata[userId]`.
    pub user_id: &'a str,
    pub company_name: Option<&'a str>,
}

#[derive(Deserialize)]
struct Created {
    id: String,
}

impl StripeClient {
    /// Create a customer and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError`] if the request fails or is rejected.
    pub async fn create_customer(&self, customer: &NewCustomer<'_>) -> Result<String, BillingError> {
        let form = Form::new()
            .field("email", customer.email)
            .optional("name", customer.name)
            .field("metadata[userId]", customer.user_id)
            .optional("metadata[companyName]", customer.company_name);
        let created: Created = self.post_form("customers", &form).await?;
        tracing::info!(customer_id = %created.id, "created billing customer");
        Ok(created.id)
    }
}
