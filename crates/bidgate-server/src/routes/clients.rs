//! Client records, onboarding, invites, and the evidence tally.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use bidgate_core::entities::Client;
use bidgate_core::evidence::aggregate;
use bidgate_core::invite::{invite_token, invite_url};
use bidgate_core::responses::{
    ClientResponse, ClientsResponse, EvidenceResponse, OnboardResponse, SendInviteResponse,
    SuccessResponse,
};
use bidgate_store::ClientFields;
use serde::Deserialize;

use super::{optional, required};
use crate::error::ApiError;
use crate::policy::Endpoint;
use crate::state::AppState;

/// Clients returned by the admin listing.
const CLIENT_LIST_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    company_name: Option<String>,
    email: Option<String>,
    contact_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateClientRequest {
    company_name: Option<String>,
    email: Option<String>,
    contact_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardRequest {
    clerk_user_id: Option<String>,
    email: Option<String>,
    company_name: Option<String>,
    user_name: Option<String>,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<ClientsResponse>, ApiError> {
    let result = state
        .store
        .list_clients(CLIENT_LIST_LIMIT)
        .await
        .map(|clients| ClientsResponse { clients })
        .map_err(ApiError::from);
    Endpoint::ListClients
        .settle(result, ClientsResponse::default)
        .map(Json)
}

/// Create a client for an invite, or return the one already holding the
/// derived invite token.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateClientRequest>, JsonRejection>,
) -> Result<Json<ClientResponse>, ApiError> {
    let Json(body) = payload?;
    let company_name = required(body.company_name.as_deref(), "company_name")?;
    let email = optional(body.email.as_deref());
    let token = invite_token(&company_name);
    if token.is_empty() {
        return Err(ApiError::Validation(
            "company_name must contain a letter or digit".into(),
        ));
    }

    if let Some(client) = state.store.find_client_by_invite_token(&token).await? {
        tracing::info!(client_id = %client.id, %token, "client already exists for invite token");
        return Ok(Json(ClientResponse {
            client,
            existed: true,
        }));
    }

    let contact_name = optional(body.contact_name.as_deref());
    let fields = ClientFields {
        company_name: Some(company_name.clone()),
        email: email.clone(),
        contact_name: contact_name.clone(),
        invite_token: Some(token.clone()),
        invite_sent: Some(false),
        invite_accepted: Some(false),
        ..ClientFields::default()
    };
    let id = state.store.create_client(&fields).await?;
    tracing::info!(client_id = %id, %token, "created client");

    Ok(Json(ClientResponse {
        client: Client {
            id,
            company_name: Some(company_name),
            email,
            contact_name,
            invite_token: Some(token),
            ..Client::default()
        },
        existed: false,
    }))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClientResponse>, ApiError> {
    let client = state
        .store
        .get_client(&id)
        .await?
        .ok_or(ApiError::NotFound("Client"))?;
    Ok(Json(ClientResponse {
        client,
        existed: false,
    }))
}

/// Profile edit. Only the fields present in the body are written.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateClientRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Json(body) = payload?;
    let fields = ClientFields {
        company_name: optional(body.company_name.as_deref()),
        email: optional(body.email.as_deref()),
        contact_name: optional(body.contact_name.as_deref()),
        ..ClientFields::default()
    };
    if fields.is_empty() {
        return Err(ApiError::Validation("Nothing to update".into()));
    }
    if state.store.get_client(&id).await?.is_none() {
        return Err(ApiError::NotFound("Client"));
    }
    state.store.update_client(&id, &fields).await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// Mark an invite as sent and return the link to share.
pub async fn send_invite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SendInviteResponse>, ApiError> {
    let client = state
        .store
        .get_client(&id)
        .await?
        .ok_or(ApiError::NotFound("Client"))?;
    if client.invite_accepted {
        return Err(ApiError::AlreadyAccepted);
    }

    let token = match client.invite_token.filter(|t| !t.is_empty()) {
        Some(token) => token,
        None => {
            let name = required(client.company_name.as_deref(), "company_name")?;
            invite_token(&name)
        }
    };
    state
        .store
        .update_client(
            &id,
            &ClientFields {
                invite_token: Some(token.clone()),
                invite_sent: Some(true),
                ..ClientFields::default()
            },
        )
        .await?;

    Ok(Json(SendInviteResponse {
        invite_url: invite_url(&state.app_url, &token),
        invite_token: token,
    }))
}

/// Self-signup: link a new client to the external auth user, once.
pub async fn onboard(
    State(state): State<AppState>,
    payload: Result<Json<OnboardRequest>, JsonRejection>,
) -> Result<Json<OnboardResponse>, ApiError> {
    let Json(body) = payload?;
    let user_id = required(body.clerk_user_id.as_deref(), "clerkUserId")?;
    let email = required(body.email.as_deref(), "email")?;

    if let Some(client) = state.store.find_client_by_user(&user_id).await? {
        return Ok(Json(OnboardResponse {
            client_id: client.id,
        }));
    }

    let fields = ClientFields {
        company_name: optional(body.company_name.as_deref()),
        email: Some(email),
        contact_name: optional(body.user_name.as_deref()),
        clerk_user_id: Some(user_id),
        ..ClientFields::default()
    };
    let client_id = state.store.create_client(&fields).await?;
    tracing::info!(%client_id, "onboarded client");
    Ok(Json(OnboardResponse { client_id }))
}

/// Evidence counts per category, largest first.
pub async fn evidence(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EvidenceResponse>, ApiError> {
    let result = state
        .store
        .list_evidence_for_client(&id)
        .await
        .map(|records| EvidenceResponse {
            evidence: aggregate(records.into_iter().filter_map(|r| r.category)),
        })
        .map_err(ApiError::from);
    Endpoint::ClientEvidence
        .settle(result, EvidenceResponse::default)
        .map(Json)
}
