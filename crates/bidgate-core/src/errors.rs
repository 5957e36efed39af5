//! Cross-cutting error types for bidgate.
//!
//! Upstream transport errors live in their own crates (`StoreError`,
//! `BillingError`, `AnalysisError`). The HTTP layer folds all of them into a
//! single response error.

use thiserror::Error;

/// Errors raised by domain rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// The invite linked to this token has already been accepted.
    #[error("Invite already accepted")]
    AlreadyAccepted,

    /// Input failed validation (missing or malformed field).
    #[error("{0}")]
    Validation(String),
}
