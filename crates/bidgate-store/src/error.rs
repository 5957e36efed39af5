//! Record store error types.

use thiserror::Error;

/// Errors that can occur when talking to the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The record store returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the record store.
        status: u16,
        /// Response body.
        message: String,
    },

    /// Failed to encode a request or decode a response.
    #[error("parse error: {0}")]
    Parse(String),
}
