//! Shared HTTP response helpers for the record store client.

use crate::error::StoreError;

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success. Otherwise the status and body
/// are logged and returned as [`StoreError::Api`]. Nothing is retried.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let url = resp.url().path().to_string();
    let message = resp.text().await.unwrap_or_default();
    tracing::warn!(
        status = status.as_u16(),
        path = %url,
        body = %message,
        "record store request failed"
    );
    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}
