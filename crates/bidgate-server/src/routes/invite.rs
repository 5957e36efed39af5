//! Invite validation and acceptance.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use bidgate_core::enums::SubscriptionStatus;
use bidgate_core::invite::ensure_acceptable;
use bidgate_core::responses::{AcceptInviteResponse, InviteStatusResponse};
use bidgate_store::ClientFields;
use serde::Deserialize;

use super::{optional, required};
use crate::error::ApiError;
use crate::policy::Endpoint;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AcceptInviteRequest {
    clerk_user_id: Option<String>,
    email: Option<String>,
}

pub async fn status(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<InviteStatusResponse>, ApiError> {
    let result = state
        .store
        .find_client_by_invite_token(&token)
        .await
        .map(|found| {
            found.map_or_else(InviteStatusResponse::invalid, |client| InviteStatusResponse {
                valid: true,
                already_accepted: Some(client.invite_accepted),
                company_name: client.company_name,
                email: client.email,
                client_id: Some(client.id),
            })
        })
        .map_err(ApiError::from);
    Endpoint::InviteStatus
        .settle(result, InviteStatusResponse::invalid)
        .map(Json)
}

/// Accept an invite: link the auth user and activate the subscription.
///
/// Not idempotent. A second call for the same token fails with
/// `AlreadyAccepted`.
pub async fn accept(
    State(state): State<AppState>,
    Path(token): Path<String>,
    payload: Result<Json<AcceptInviteRequest>, JsonRejection>,
) -> Result<Json<AcceptInviteResponse>, ApiError> {
    let Json(body) = payload?;
    let user_id = required(body.clerk_user_id.as_deref(), "clerk_user_id")?;

    let client = state
        .store
        .find_client_by_invite_token(&token)
        .await?
        .ok_or(ApiError::NotFound("Invite"))?;
    ensure_acceptable(&client)?;

    // Overwrites any existing status, including one set by billing.
    let fields = ClientFields {
        invite_accepted: Some(true),
        clerk_user_id: Some(user_id),
        subscription_status: Some(SubscriptionStatus::Active),
        email: if client.email.is_none() {
            optional(body.email.as_deref())
        } else {
            None
        },
        ..ClientFields::default()
    };
    state.store.update_client(&client.id, &fields).await?;
    tracing::info!(client_id = %client.id, "invite accepted");

    Ok(Json(AcceptInviteResponse {
        success: true,
        client_id: client.id,
    }))
}
