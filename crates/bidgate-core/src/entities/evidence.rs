use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EvidenceCategory;

/// A single piece of supporting evidence in a client's library.
///
/// `category` is `None` when the stored label is outside the known enumeration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EvidenceRecord {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<EvidenceCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}
