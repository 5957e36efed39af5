//! JSON Schema for the external response types.

use bidgate_core::responses::{
    AcceptInviteResponse, AnalysisResponse, CaseStudiesResponse, ClientResponse,
    ClientsResponse, ErrorBody, EvidenceResponse, InviteStatusResponse, OnboardResponse,
    ProjectsResponse, QuestionsResponse, RedirectResponse, SendInviteResponse,
    SubscriptionStatusResponse, SuccessResponse, TendersResponse, WebhookAck,
};
use schemars::{Schema, schema_for};

/// Names accepted by [`schema_for_type`].
pub const TYPE_NAMES: [&str; 17] = [
    "error",
    "clients",
    "client",
    "evidence",
    "tenders",
    "questions",
    "projects",
    "case-studies",
    "onboard",
    "invite-status",
    "accept-invite",
    "send-invite",
    "success",
    "analysis",
    "redirect",
    "subscription-status",
    "webhook-ack",
];

/// Schema of the response type registered under `name`.
#[must_use]
pub fn schema_for_type(name: &str) -> Option<Schema> {
    let schema = match name {
        "error" => schema_for!(ErrorBody),
        "clients" => schema_for!(ClientsResponse),
        "client" => schema_for!(ClientResponse),
        "evidence" => schema_for!(EvidenceResponse),
        "tenders" => schema_for!(TendersResponse),
        "questions" => schema_for!(QuestionsResponse),
        "projects" => schema_for!(ProjectsResponse),
        "case-studies" => schema_for!(CaseStudiesResponse),
        "onboard" => schema_for!(OnboardResponse),
        "invite-status" => schema_for!(InviteStatusResponse),
        "accept-invite" => schema_for!(AcceptInviteResponse),
        "send-invite" => schema_for!(SendInviteResponse),
        "success" => schema_for!(SuccessResponse),
        "analysis" => schema_for!(AnalysisResponse),
        "redirect" => schema_for!(RedirectResponse),
        "subscription-status" => schema_for!(SubscriptionStatusResponse),
        "webhook-ack" => schema_for!(WebhookAck),
        _ => return None,
    };
    Some(schema)
}
