//! Per-endpoint behaviour on upstream failure.
//!
//! Read endpoints that feed dashboards degrade to an empty (or "invalid")
//! body with status 200. Everything that writes, or whose absence would be
//! misleading, propagates the error.

use crate::error::ApiError;

/// What an endpoint does when an upstream call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log and answer 200 with the endpoint's empty body.
    Degrade,
    /// Answer with the error status.
    Propagate,
}

// ---------------------------------------------------------------------------
// Endpoint
// ---------------------------------------------------------------------------

/// Every route the API serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Health,
    ListClients,
    CreateClient,
    GetClient,
    UpdateClient,
    SendInvite,
    ClientEvidence,
    ClientTenders,
    ClientProjects,
    TenderQuestions,
    ProjectCaseStudies,
    Onboard,
    InviteStatus,
    AcceptInvite,
    Analyse,
    CreateCheckout,
    Portal,
    SubscriptionStatus,
    BillingWebhook,
}

impl Endpoint {
    pub const ALL: [Self; 19] = [
        Self::Health,
        Self::ListClients,
        Self::CreateClient,
        Self::GetClient,
        Self::UpdateClient,
        Self::SendInvite,
        Self::ClientEvidence,
        Self::ClientTenders,
        Self::ClientProjects,
        Self::TenderQuestions,
        Self::ProjectCaseStudies,
        Self::Onboard,
        Self::InviteStatus,
        Self::AcceptInvite,
        Self::Analyse,
        Self::CreateCheckout,
        Self::Portal,
        Self::SubscriptionStatus,
        Self::BillingWebhook,
    ];

    #[must_use]
    pub const fn failure_policy(self) -> FailurePolicy {
        match self {
            Self::ListClients
            | Self::ClientEvidence
            | Self::ClientTenders
            | Self::ClientProjects
            | Self::TenderQuestions
            | Self::ProjectCaseStudies
            | Self::InviteStatus => FailurePolicy::Degrade,
            Self::Health
            | Self::CreateClient
            | Self::GetClient
            | Self::UpdateClient
            | Self::SendInvite
            | Self::Onboard
            | Self::AcceptInvite
            | Self::Analyse
            | Self::CreateCheckout
            | Self::Portal
            | Self::SubscriptionStatus
            | Self::BillingWebhook => FailurePolicy::Propagate,
        }
    }

    /// `METHOD /path` as routed.
    #[must_use]
    pub const fn route(self) -> &'static str {
        match self {
            Self::Health => "GET /healthz",
            Self::ListClients => "GET /clients",
            Self::CreateClient => "POST /clients",
            Self::GetClient => "GET /clients/{id}",
            Self::UpdateClient => "PATCH /clients/{id}",
            Self::SendInvite => "POST /clients/{id}/invite",
            Self::ClientEvidence => "GET /clients/{id}/evidence",
            Self::ClientTenders => "GET /clients/{id}/tenders",
            Self::ClientProjects => "GET /clients/{id}/projects",
            Self::TenderQuestions => "GET /tenders/{id}/questions",
            Self::ProjectCaseStudies => "GET /projects/{id}/case-studies",
            Self::Onboard => "POST /client/create",
            Self::InviteStatus => "GET /invite/{token}",
            Self::AcceptInvite => "POST /invite/{token}/accept",
            Self::Analyse => "POST /bidgate/analyse",
            Self::CreateCheckout => "POST /stripe/create-checkout-session",
            Self::Portal => "POST /stripe/portal",
            Self::SubscriptionStatus => "GET /stripe/subscription-status",
            Self::BillingWebhook => "POST /stripe/webhook",
        }
    }

    /// Apply this endpoint's policy to a handler result.
    ///
    /// Only upstream failures degrade; validation and not-found errors always
    /// propagate.
    ///
    /// # Errors
    ///
    /// Returns the original error unless the endpoint degrades and the error
    /// is an upstream failure.
    pub fn settle<T>(self, result: Result<T, ApiError>, empty: impl FnOnce() -> T) -> Result<T, ApiError> {
        match result {
            Err(error) if error.is_upstream() && self.failure_policy() == FailurePolicy::Degrade => {
                tracing::warn!(endpoint = self.route(), %error, "degrading to empty response");
                Ok(empty())
            }
            other => other,
        }
    }
}
