//! Response checking and form bodies for the billing API.

use serde::Deserialize;

use crate::error::BillingError;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// Return the response unchanged on success, otherwise log it and convert it
/// to [`BillingError::Api`] using the provider's `error.message` when present.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, BillingError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let path = resp.url().path().to_string();
    let body = resp.text().await.unwrap_or_default();
    tracing::warn!(
        status = status.as_u16(),
        path = %path,
        body = %body,
        "billing request failed"
    );
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .ok()
        .and_then(|e| e.error.message)
        .unwrap_or(body);
    Err(BillingError::Api {
        status: status.as_u16(),
        message,
    })
}

/// An `application/x-www-form-urlencoded` body with bracketed nested keys
/// (`metadata[userId]`, `line_items[0][price]`).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Form {
    pairs: Vec<(String, String)>,
}

impl Form {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Add the field only when `value` is present and not blank.
    #[must_use]
    pub fn optional(self, key: impl Into<String>, value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => self.field(key, v),
            _ => self,
        }
    }

    #[must_use]
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
