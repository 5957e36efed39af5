//! Route table and shared request helpers.

mod analysis;
mod billing;
mod clients;
mod invite;
mod projects;
mod tenders;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{Method, header};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

/// Build the full API router.
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/clients", get(clients::list).post(clients::create))
        .route("/clients/{id}", get(clients::get_one).patch(clients::update))
        .route("/clients/{id}/invite", post(clients::send_invite))
        .route("/clients/{id}/evidence", get(clients::evidence))
        .route("/clients/{id}/tenders", get(tenders::for_client))
        .route("/clients/{id}/projects", get(projects::for_client))
        .route("/tenders/{id}/questions", get(tenders::questions))
        .route("/projects/{id}/case-studies", get(projects::case_studies))
        .route("/client/create", post(clients::onboard))
        .route("/invite/{token}", get(invite::status))
        .route("/invite/{token}/accept", post(invite::accept))
        .route("/bidgate/analyse", post(analysis::analyse))
        .route(
            "/stripe/create-checkout-session",
            post(billing::create_checkout_session),
        )
        .route("/stripe/portal", post(billing::portal))
        .route(
            "/stripe/subscription-status",
            get(billing::subscription_status),
        )
        .route("/stripe/webhook", post(billing::webhook))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

/// Trimmed value of a required text field.
fn required(value: Option<&str>, field: &str) -> Result<String, ApiError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ApiError::Validation(format!("{field} is required"))),
    }
}

/// Trimmed value of an optional text field; blanks become `None`.
fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
