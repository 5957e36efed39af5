//! Signed webhook verification and event decoding.
//!
//! The provider signs each delivery with HMAC-SHA256 over `"{t}.{payload}"`
//! and sends `Stripe-Signature: t=<unix secs>,v1=<hex>[,v1=<hex>...]`. A
//! delivery is accepted when any `v1` matches and `t` is within the
//! tolerance of the current time.

use bidgate_core::enums::SubscriptionStatus;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use serde_json::Value;
use sha2::Sha256;

use crate::BillingError;

type HmacSha256 = Hmac<Sha256>;

/// Name of the signature header.
pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Verify a delivery against `secret` at time `now` (unix seconds).
///
/// # Errors
///
/// Returns [`BillingError::InvalidSignature`] when the header is malformed,
/// the timestamp is outside `tolerance_secs`, or no signature matches.
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance_secs: u64,
    now: i64,
) -> Result<(), BillingError> {
    let mut timestamp = None;
    let mut signatures = Vec::new();
    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", v)) => timestamp = v.parse::<i64>().ok(),
            Some(("v1", v)) => signatures.push(v),
            _ => {}
        }
    }
    let timestamp = timestamp.ok_or(BillingError::InvalidSignature("missing timestamp"))?;
    if signatures.is_empty() {
        return Err(BillingError::InvalidSignature("missing v1 signature"));
    }
    if now.abs_diff(timestamp) > tolerance_secs {
        return Err(BillingError::InvalidSignature("timestamp outside tolerance"));
    }

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| BillingError::InvalidSignature("unusable secret"))?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);

    let matched = signatures.iter().any(|sig| {
        hex::decode(sig).is_ok_and(|bytes| mac.clone().verify_slice(&bytes).is_ok())
    });
    if matched {
        Ok(())
    } else {
        Err(BillingError::InvalidSignature("no matching signature"))
    }
}

/// Hex signature for `payload` at `timestamp`, in the provider's scheme.
///
/// # Errors
///
/// Returns [`BillingError::InvalidSignature`] if the secret cannot key the MAC.
pub fn sign(payload: &[u8], secret: &str, timestamp: i64) -> Result<String, BillingError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| BillingError::InvalidSignature("unusable secret"))?;
    mac.update(format!("{timestamp}.").as_bytes());
    mac.update(payload);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    kind: String,
    data: RawEventData,
}

#[derive(Debug, Deserialize)]
struct RawEventData {
    object: Value,
}

/// The webhook events this service acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    /// A hosted checkout finished. `user_id` comes from the session metadata.
    CheckoutCompleted {
        customer_id: String,
        user_id: Option<String>,
        email: Option<String>,
        name: Option<String>,
        company_name: Option<String>,
    },
    /// A subscription was created, updated, or deleted.
    SubscriptionChanged {
        customer_id: String,
        status: Option<SubscriptionStatus>,
    },
    /// Any other event type, acknowledged without action.
    Ignored(String),
}

fn text(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl WebhookEvent {
    /// Decode an already-verified payload.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::Parse`] for malformed JSON or a handled event
    /// without a customer id.
    pub fn parse(payload: &[u8]) -> Result<Self, BillingError> {
        let event: RawEvent = serde_json::from_slice(payload)
            .map_err(|e| BillingError::Parse(format!("webhook event: {e}")))?;
        let object = &event.data.object;
        let customer = || {
            text(object, "/customer")
                .ok_or_else(|| BillingError::Parse(format!("{}: missing customer", event.kind)))
        };
        match event.kind.as_str() {
            "checkout.session.completed" => Ok(Self::CheckoutCompleted {
                customer_id: customer()?,
                user_id: text(object, "/metadata/userId"),
                email: text(object, "/customer_details/email")
                    .or_else(|| text(object, "/customer_email")),
                name: text(object, "/customer_details/name"),
                company_name: text(object, "/metadata/companyName"),
            }),
            "customer.subscription.created"
            | "customer.subscription.updated"
            | "customer.subscription.deleted" => Ok(Self::SubscriptionChanged {
                customer_id: customer()?,
                status: text(object, "/status")
                    .as_deref()
                    .and_then(SubscriptionStatus::parse),
            }),
            _ => Ok(Self::Ignored(event.kind.clone())),
        }
    }
}

/// Verify the signature at the current time, then decode the event.
///
/// # Errors
///
/// See [`verify_signature`] and [`WebhookEvent::parse`].
pub fn construct_event(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance_secs: u64,
) -> Result<WebhookEvent, BillingError> {
    verify_signature(
        payload,
        header,
        secret,
        tolerance_secs,
        chrono::Utc::now().timestamp(),
    )?;
    WebhookEvent::parse(payload)
}
