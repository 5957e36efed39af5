use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A tender (bid opportunity) owned by a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Tender {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Number of questions linked to the tender (0 when none are linked).
    pub question_count: usize,
}

/// A question within a tender, with its drafted answer and evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TenderQuestion {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tender_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_text: Option<String>,
    /// Raw evaluation text as first produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<String>,
    /// Evaluation after review.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_evaluation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighting: Option<f64>,
}
