//! Billing error types.

use thiserror::Error;

/// Errors from the billing provider or from webhook verification.
#[derive(Debug, Error)]
pub enum BillingError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned a non-success status code.
    #[error("billing API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A response was missing a field or could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// The `Stripe-Signature` header is missing, malformed, or does not match.
    #[error("invalid webhook signature: {0}")]
    InvalidSignature(&'static str),
}
