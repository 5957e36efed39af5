use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{InviteState, SubscriptionStatus};

/// A customer organisation using the product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Client {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_token: Option<String>,
    #[serde(default)]
    pub invite_sent: bool,
    #[serde(default)]
    pub invite_accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_status: Option<SubscriptionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe_customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clerk_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Client {
    /// Onboarding state derived from the invite fields.
    #[must_use]
    pub fn invite_state(&self) -> InviteState {
        if self.invite_accepted {
            InviteState::Accepted
        } else if self.invite_token.as_deref().is_some_and(|t| !t.is_empty()) {
            InviteState::Invited
        } else {
            InviteState::NoInvite
        }
    }
}
