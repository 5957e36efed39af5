//! Checkout, customer portal, live subscription status, and provider webhooks.

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use bidgate_billing::webhook::SIGNATURE_HEADER;
use bidgate_billing::{BillingError, CheckoutParams, NewCustomer, WebhookEvent, construct_event};
use bidgate_core::responses::{RedirectResponse, SubscriptionStatusResponse, WebhookAck};
use bidgate_store::ClientFields;
use serde::Deserialize;

use super::{optional, required};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    user_id: Option<String>,
    email: Option<String>,
    name: Option<String>,
    company_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    user_id: Option<String>,
}

/// Start a subscription checkout, creating the billing customer on first use.
pub async fn create_checkout_session(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<RedirectResponse>, ApiError> {
    let billing = state.billing()?;
    let Json(body) = payload?;
    let user_id = required(body.user_id.as_deref(), "userId")?;
    let email = required(body.email.as_deref(), "email")?;
    let name = optional(body.name.as_deref());
    let company_name = optional(body.company_name.as_deref());

    let client = state.store.find_client_by_user(&user_id).await?;
    let existing = client
        .as_ref()
        .and_then(|c| c.stripe_customer_id.clone())
        .filter(|id| !id.is_empty());

    let customer_id = if let Some(id) = existing {
        id
    } else {
        let id = billing
            .client
            .create_customer(&NewCustomer {
                email: &email,
                name: name.as_deref(),
                user_id: &user_id,
                company_name: company_name.as_deref(),
            })
            .await?;
        if let Some(client) = &client {
            state
                .store
                .update_client(
                    &client.id,
                    &ClientFields {
                        stripe_customer_id: Some(id.clone()),
                        ..ClientFields::default()
                    },
                )
                .await?;
        }
        id
    };

    let success_url = state.app_link(&billing.config.success_url, "/dashboard?checkout=success");
    let cancel_url = state.app_link(&billing.config.cancel_url, "/pricing?checkout=cancelled");
    let url = billing
        .client
        .create_checkout_session(&CheckoutParams {
            customer_id: &customer_id,
            price_id: &billing.config.price_id,
            trial_days: billing.config.trial_days,
            user_id: &user_id,
            success_url: &success_url,
            cancel_url: &cancel_url,
        })
        .await?;
    Ok(Json(RedirectResponse { url }))
}

async fn customer_for_user(state: &AppState, user_id: &str) -> Result<Option<String>, ApiError> {
    Ok(state
        .store
        .find_client_by_user(user_id)
        .await?
        .and_then(|c| c.stripe_customer_id)
        .filter(|id| !id.is_empty()))
}

/// Open the self-service billing portal for the user's customer.
pub async fn portal(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<RedirectResponse>, ApiError> {
    let billing = state.billing()?;
    let Json(body) = payload?;
    let user_id = required(body.user_id.as_deref(), "userId")?;
    let customer_id = customer_for_user(&state, &user_id)
        .await?
        .ok_or(ApiError::NoSubscriptionFound)?;
    let return_url = state.app_link(&billing.config.portal_return_url, "/dashboard");
    let url = billing
        .client
        .create_portal_session(&customer_id, &return_url)
        .await?;
    Ok(Json(RedirectResponse { url }))
}

/// Status of the user's latest subscription, asked of the provider each time.
pub async fn subscription_status(
    State(state): State<AppState>,
    Query(query): Query<UserRequest>,
) -> Result<Json<SubscriptionStatusResponse>, ApiError> {
    let billing = state.billing()?;
    let user_id = required(query.user_id.as_deref(), "userId")?;
    let status = match customer_for_user(&state, &user_id).await? {
        Some(customer_id) => {
            billing
                .client
                .latest_subscription_status(&customer_id)
                .await?
        }
        None => None,
    };
    Ok(Json(SubscriptionStatusResponse { status }))
}

/// Verified provider events. Unknown events are acknowledged and ignored.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, ApiError> {
    let billing = state.billing()?;
    if !billing.config.has_webhook_secret() {
        return Err(ApiError::NotConfigured("Billing webhook secret"));
    }
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Validation("Missing Stripe-Signature header".into()))?;
    let event = construct_event(
        &body,
        signature,
        &billing.config.webhook_secret,
        billing.config.webhook_tolerance_secs,
    )
    .map_err(|error| match error {
        // Signed but undecodable bodies are bad requests.
        BillingError::Parse(message) => {
            ApiError::Validation(format!("Invalid webhook payload: {message}"))
        }
        other => ApiError::from(other),
    })?;

    match event {
        WebhookEvent::CheckoutCompleted {
            customer_id,
            user_id,
            email,
            name,
            company_name,
        } => {
            checkout_completed(
                &state,
                CompletedCheckout {
                    customer_id,
                    user_id,
                    email,
                    name,
                    company_name,
                },
            )
            .await?;
        }
        WebhookEvent::SubscriptionChanged {
            customer_id,
            status,
        } => {
            let Some(client) = state.store.find_client_by_customer(&customer_id).await? else {
                tracing::warn!(%customer_id, "subscription event for unknown customer");
                return Ok(Json(WebhookAck { received: true }));
            };
            if let Some(status) = status {
                state
                    .store
                    .update_client(
                        &client.id,
                        &ClientFields {
                            subscription_status: Some(status),
                            ..ClientFields::default()
                        },
                    )
                    .await?;
                tracing::info!(client_id = %client.id, %status, "subscription status updated");
            }
        }
        WebhookEvent::Ignored(kind) => tracing::debug!(%kind, "ignoring webhook event"),
    }
    Ok(Json(WebhookAck { received: true }))
}

struct CompletedCheckout {
    customer_id: String,
    user_id: Option<String>,
    email: Option<String>,
    name: Option<String>,
    company_name: Option<String>,
}

/// Link the customer to the user's client, creating the client on the first
/// event for a user nobody has onboarded yet.
async fn checkout_completed(
    state: &AppState,
    checkout: CompletedCheckout,
) -> Result<(), ApiError> {
    let existing = match &checkout.user_id {
        Some(user_id) => state.store.find_client_by_user(user_id).await?,
        None => {
            state
                .store
                .find_client_by_customer(&checkout.customer_id)
                .await?
        }
    };

    match existing {
        Some(client) => {
            if client.stripe_customer_id.as_deref() != Some(checkout.customer_id.as_str()) {
                state
                    .store
                    .update_client(
                        &client.id,
                        &ClientFields {
                            stripe_customer_id: Some(checkout.customer_id),
                            ..ClientFields::default()
                        },
                    )
                    .await?;
            }
        }
        None => {
            let Some(user_id) = checkout.user_id else {
                tracing::warn!(customer_id = %checkout.customer_id, "checkout without user id for unknown customer");
                return Ok(());
            };
            let company_name = checkout
                .company_name
                .or_else(|| checkout.name.clone())
                .or_else(|| checkout.email.clone());
            let id = state
                .store
                .create_client(&ClientFields {
                    company_name,
                    email: checkout.email,
                    contact_name: checkout.name,
                    clerk_user_id: Some(user_id),
                    stripe_customer_id: Some(checkout.customer_id),
                    ..ClientFields::default()
                })
                .await?;
            tracing::info!(client_id = %id, "created client from checkout");
        }
    }
    Ok(())
}
