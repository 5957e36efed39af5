use bidgate_core::entities::Client;
use bidgate_core::enums::SubscriptionStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::flex;

#[derive(Debug, Deserialize)]
pub struct RawClient {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default, deserialize_with = "flex::opt_string")]
    client_name: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    email: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    contact_name: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    invite_token: Option<String>,
    #[serde(default, deserialize_with = "flex::yes_no")]
    invite_sent: bool,
    #[serde(default, deserialize_with = "flex::yes_no")]
    invite_accepted: bool,
    #[serde(default, deserialize_with = "flex::opt_string")]
    subscription_status: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    stripe_customer_id: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    clerk_user_id: Option<String>,
    #[serde(
        rename = "Created Date",
        default,
        deserialize_with = "flex::opt_datetime"
    )]
    created_date: Option<DateTime<Utc>>,
}

impl From<RawClient> for Client {
    fn from(raw: RawClient) -> Self {
        Self {
            id: raw.id,
            company_name: raw.client_name,
            email: raw.email,
            contact_name: raw.contact_name,
            invite_token: raw.invite_token,
            invite_sent: raw.invite_sent,
            invite_accepted: raw.invite_accepted,
            subscription_status: raw
                .subscription_status
                .as_deref()
                .and_then(SubscriptionStatus::parse),
            stripe_customer_id: raw.stripe_customer_id,
            clerk_user_id: raw.clerk_user_id,
            created_at: raw.created_date,
        }
    }
}

/// Partial write shape for a client record.
///
/// Only fields that are `Some` are sent, so a partial update never clears
/// fields it does not mention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientFields {
    #[serde(rename = "client_name", skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_sent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_accepted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_status: Option<SubscriptionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe_customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clerk_user_id: Option<String>,
}

impl ClientFields {
    /// True when there is nothing to write.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RAW_NAMES: [&str; 4] = ["_id", "client_name", "Created Date", "Modified Date"];

    fn map(json: serde_json::Value) -> Client {
        serde_json::from_value::<RawClient>(json)
            .expect("raw client decodes")
            .into()
    }

    #[test]
    fn maps_storage_names_to_external_names() {
        let client = map(serde_json::json!({
            "_id": "1700000000000x1",
            "client_name": "Acme & Co.",
            "email": "bids@acme.test",
            "invite_token": "acmeco",
            "invite_sent": "yes",
            "invite_accepted": "no",
            "subscription_status": "trialing",
            "Created Date": "2025-01-15T10:00:00.000Z",
            "Modified Date": "2025-01-16T10:00:00.000Z"
        }));

        assert_eq!(client.id, "1700000000000x1");
        assert_eq!(client.company_name.as_deref(), Some("Acme & Co."));
        assert!(client.invite_sent);
        assert!(!client.invite_accepted);
        assert_eq!(client.subscription_status, Some(SubscriptionStatus::Trialing));
        assert!(client.created_at.is_some());

        let value = serde_json::to_value(&client).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        for raw in RAW_NAMES {
            assert!(!keys.iter().any(|k| k.as_str() == raw), "leaked {raw}");
        }
    }

    #[test]
    fn native_booleans_are_accepted() {
        let client = map(serde_json::json!({"_id": "c", "invite_accepted": true}));
        assert!(client.invite_accepted);
    }

    #[test]
    fn sparse_record_maps_without_placeholders() {
        let client = map(serde_json::json!({"_id": "c", "email": ""}));
        assert_eq!(
            client,
            Client {
                id: "c".into(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn unknown_subscription_status_is_absent() {
        let client = map(serde_json::json!({"_id": "c", "subscription_status": "legacy"}));
        assert!(client.subscription_status.is_none());
    }

    #[test]
    fn fields_serialize_to_storage_names_and_skip_unset() {
        let fields = ClientFields {
            company_name: Some("Acme".into()),
            invite_accepted: Some(true),
            subscription_status: Some(SubscriptionStatus::Active),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&fields).unwrap(),
            serde_json::json!({
                "client_name": "Acme",
                "invite_accepted": true,
                "subscription_status": "active"
            })
        );
        assert!(!fields.is_empty());
        assert!(ClientFields::default().is_empty());
    }
}
