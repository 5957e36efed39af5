//! # bidgate-analysis
//!
//! Forwards an uploaded tender document to the analysis workflow webhook and
//! relays its result.
//!
//! Binary documents (pdf, docx, doc) are sent base64-encoded. Plain text is
//! decoded and sent inline, capped at a configured character count. The
//! client's evidence tally rides along so the workflow can score coverage.
//! The workflow's answer is passed through without validation.

mod error;
pub mod payload;

pub use error::AnalysisError;
pub use payload::{AnalysisPayload, Upload, classify};

use std::time::Duration;

use serde_json::Value;

/// The workflow engine's answer, as relayed to the browser.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub success: bool,
    pub analysis: Value,
    /// Present only when the engine reported its own counts.
    pub evidence_counts: Option<Value>,
    pub total_evidence: Option<Value>,
}

impl AnalysisOutcome {
    /// Read an engine response body.
    ///
    /// Workflow tools often wrap a single item in an array; the first element
    /// is used. `success` defaults to true. When there is no `analysis` key the
    /// whole body is the analysis.
    #[must_use]
    pub fn from_body(body: Value) -> Self {
        let body = match body {
            Value::Array(items) => items.into_iter().next().unwrap_or(Value::Null),
            other => other,
        };
        let success = body
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(true);
        let evidence_counts = body.get("evidence_counts").cloned();
        let total_evidence = body.get("total_evidence").cloned();
        let analysis = match body {
            Value::Object(mut map) if map.contains_key("analysis") => {
                map.remove("analysis").unwrap_or(Value::Null)
            }
            other => other,
        };
        Self {
            success,
            analysis,
            evidence_counts,
            total_evidence,
        }
    }
}

/// HTTP client for the analysis webhook.
#[derive(Clone)]
pub struct Dispatcher {
    http: reqwest::Client,
    webhook_url: String,
}

impl Dispatcher {
    /// # Errors
    ///
    /// Returns [`AnalysisError::Http`] if the underlying `reqwest::Client` fails to build.
    pub fn new(webhook_url: &str, timeout: Duration) -> Result<Self, AnalysisError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("bidgate/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            webhook_url: webhook_url.to_string(),
        })
    }

    /// Post `payload` and relay the engine's answer.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] on transport failure, a non-success status,
    /// or a non-JSON body.
    pub async fn dispatch(&self, payload: &AnalysisPayload) -> Result<AnalysisOutcome, AnalysisError> {
        tracing::info!(
            client_id = %payload.client_id,
            file_type = %payload.file_type,
            truncated = payload.text_truncated,
            "dispatching document for analysis"
        );
        let resp = self
            .http
            .post(&self.webhook_url)
            .json(payload)
            .send()
            .await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), body = %text, "analysis workflow failed");
            return Err(AnalysisError::Api {
                status: status.as_u16(),
                message: text,
            });
        }
        let body: Value = serde_json::from_str(&text)
            .map_err(|e| AnalysisError::Parse(format!("workflow response: {e}")))?;
        Ok(AnalysisOutcome::from_body(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn outcome_unwraps_single_item_arrays() {
        let outcome = AnalysisOutcome::from_body(json!([
            {"success": true, "analysis": {"score": 7}, "total_evidence": 12}
        ]));
        assert!(outcome.success);
        assert_eq!(outcome.analysis, json!({"score": 7}));
        assert_eq!(outcome.total_evidence, Some(json!(12)));
        assert!(outcome.evidence_counts.is_none());
    }

    #[test]
    fn outcome_without_analysis_key_relays_whole_body() {
        let outcome = AnalysisOutcome::from_body(json!({"summary": "ok"}));
        assert!(outcome.success);
        assert_eq!(outcome.analysis, json!({"summary": "ok"}));
    }

    #[test]
    fn outcome_keeps_reported_failure() {
        let outcome = AnalysisOutcome::from_body(json!({"success": false, "analysis": null}));
        assert!(!outcome.success);
        assert_eq!(outcome.analysis, Value::Null);
    }
}
