//! Response bodies returned as JSON by the bidgate HTTP API.
//!
//! These structs define the external contract. Field names here are the only
//! names a browser ever sees; upstream storage names never appear.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Client, Project, ProjectCaseStudy, Tender, TenderQuestion};
use crate::enums::SubscriptionStatus;
use crate::evidence::CategoryCount;

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

/// Response from `GET /clients`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ClientsResponse {
    pub clients: Vec<Client>,
}

/// Response from `GET /clients/{id}` and `POST /clients`.
///
/// `existed` is only present when `POST /clients` found a client with the same
/// invite token instead of creating one.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ClientResponse {
    pub client: Client,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub existed: bool,
}

/// Response from `GET /clients/{id}/evidence`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EvidenceResponse {
    pub evidence: Vec<CategoryCount>,
}

/// Response from `GET /clients/{id}/tenders`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TendersResponse {
    pub tenders: Vec<Tender>,
}

/// Response from `GET /tenders/{id}/questions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct QuestionsResponse {
    pub questions: Vec<TenderQuestion>,
}

/// Response from `GET /clients/{id}/projects`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
}

/// Response from `GET /projects/{id}/case-studies`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CaseStudiesResponse {
    pub case_studies: Vec<ProjectCaseStudy>,
}

/// Response from `POST /client/create`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OnboardResponse {
    pub client_id: String,
}

/// Response from `GET /invite/{token}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct InviteStatusResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub already_accepted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl InviteStatusResponse {
    /// The body returned for unknown tokens and upstream failures.
    #[must_use]
    pub fn invalid() -> Self {
        Self::default()
    }
}

/// Response from `POST /invite/{token}/accept`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AcceptInviteResponse {
    pub success: bool,
    pub client_id: String,
}

/// Response from `POST /clients/{id}/invite`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SendInviteResponse {
    pub invite_token: String,
    pub invite_url: String,
}

/// Generic acknowledgement for updates.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Response from `POST /bidgate/analyse`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AnalysisResponse {
    pub success: bool,
    /// Structured analysis as returned by the workflow engine, unvalidated.
    pub analysis: serde_json::Value,
    pub tender_name: String,
    pub evidence_counts: serde_json::Value,
    pub total_evidence: serde_json::Value,
}

/// Response from the checkout and portal routes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RedirectResponse {
    pub url: String,
}

/// Response from `GET /stripe/subscription-status`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SubscriptionStatusResponse {
    pub status: Option<SubscriptionStatus>,
}

/// Response from `POST /stripe/webhook`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WebhookAck {
    pub received: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_response_omits_existed_when_false() {
        let body = ClientResponse {
            client: Client {
                id: "c1".into(),
                ..Default::default()
            },
            existed: false,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("existed").is_none());

        let body = ClientResponse {
            existed: true,
            ..body
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["existed"], true);
    }

    #[test]
    fn invalid_invite_only_carries_valid_flag() {
        let value = serde_json::to_value(InviteStatusResponse::invalid()).unwrap();
        assert_eq!(value, serde_json::json!({"valid": false}));
    }

    #[test]
    fn onboard_response_is_camel_case() {
        let value = serde_json::to_value(OnboardResponse {
            client_id: "c1".into(),
        })
        .unwrap();
        assert_eq!(value, serde_json::json!({"clientId": "c1"}));
    }
}
