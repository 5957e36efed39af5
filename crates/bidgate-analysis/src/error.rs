//! Analysis dispatch error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The upload's extension is not one of the accepted document kinds.
    #[error("unsupported file type: {0}")]
    UnsupportedFile(String),

    /// The upload was empty.
    #[error("uploaded file is empty")]
    EmptyFile,

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The workflow engine returned a non-success status code.
    #[error("workflow error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The workflow engine's response was not JSON.
    #[error("parse error: {0}")]
    Parse(String),
}
