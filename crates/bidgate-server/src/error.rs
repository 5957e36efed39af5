//! The single error type returned by route handlers.
//!
//! Every crate error is converted here, once. Client mistakes map to 400,
//! missing records to 404, everything upstream to 500 with a generic message;
//! the upstream detail goes to the log, not the browser.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bidgate_analysis::AnalysisError;
use bidgate_billing::BillingError;
use bidgate_core::errors::CoreError;
use bidgate_core::responses::ErrorBody;
use bidgate_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("No subscription found")]
    NoSubscriptionFound,

    #[error("Invite already accepted")]
    AlreadyAccepted,

    /// An optional integration is not configured on this deployment.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// An upstream call failed. The detail is logged, never returned.
    #[error("upstream unavailable: {0}")]
    Upstream(String),
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::AlreadyAccepted => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::NoSubscriptionFound => StatusCode::NOT_FOUND,
            Self::NotConfigured(_) | Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for failures of an upstream dependency, the only kind a read
    /// endpoint may degrade.
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }

    fn public_message(&self) -> String {
        match self {
            Self::Upstream(_) => "Upstream service unavailable".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        Self::Upstream(format!("record store: {error}"))
    }
}

impl From<BillingError> for ApiError {
    fn from(error: BillingError) -> Self {
        match error {
            BillingError::InvalidSignature(reason) => {
                Self::Validation(format!("Invalid webhook signature: {reason}"))
            }
            other => Self::Upstream(format!("billing: {other}")),
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::UnsupportedFile(name) => {
                Self::Validation(format!("Unsupported file type: {name}"))
            }
            AnalysisError::EmptyFile => Self::Validation("Uploaded file is empty".into()),
            other => Self::Upstream(format!("analysis: {other}")),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::AlreadyAccepted => Self::AlreadyAccepted,
            CoreError::NotFound { entity_type, .. } if entity_type == "client" => {
                Self::NotFound("Client")
            }
            CoreError::NotFound { .. } => Self::NotFound("Record"),
            other => Self::Validation(other.to_string()),
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        Self::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<axum::extract::multipart::MultipartError> for ApiError {
    fn from(error: axum::extract::multipart::MultipartError) -> Self {
        Self::Validation(format!("Invalid upload: {}", error.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ApiError::Validation("bad".into()), StatusCode::BAD_REQUEST)]
    #[case(ApiError::AlreadyAccepted, StatusCode::BAD_REQUEST)]
    #[case(ApiError::NotFound("Client"), StatusCode::NOT_FOUND)]
    #[case(ApiError::NoSubscriptionFound, StatusCode::NOT_FOUND)]
    #[case(ApiError::NotConfigured("billing"), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(ApiError::Upstream("boom".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn statuses(#[case] error: ApiError, #[case] status: StatusCode) {
        assert_eq!(error.status(), status);
    }

    #[test]
    fn upstream_detail_is_not_public() {
        let error = ApiError::from(StoreError::Api {
            status: 401,
            message: "token abc123 revoked".into(),
        });
        assert!(error.is_upstream());
        assert_eq!(error.public_message(), "Upstream service unavailable");
    }

    #[test]
    fn signature_failures_are_client_errors() {
        let error = ApiError::from(BillingError::InvalidSignature("no matching signature"));
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn already_accepted_message_is_stable() {
        assert_eq!(
            ApiError::from(CoreError::AlreadyAccepted).public_message(),
            "Invite already accepted"
        );
    }
}
