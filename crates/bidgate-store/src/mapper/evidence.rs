use bidgate_core::entities::EvidenceRecord;
use bidgate_core::enums::EvidenceCategory;
use serde::Deserialize;

use super::flex;

#[derive(Debug, Deserialize)]
pub struct RawEvidence {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default, deserialize_with = "flex::opt_string")]
    category: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    client: Option<String>,
}

impl From<RawEvidence> for EvidenceRecord {
    fn from(raw: RawEvidence) -> Self {
        Self {
            id: raw.id,
            category: raw.category.as_deref().and_then(EvidenceCategory::from_label),
            client_id: raw.client,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_category_maps_to_none() {
        let raw: RawEvidence = serde_json::from_value(serde_json::json!({
            "_id": "e1",
            "category": "Rumour",
            "client": "c1"
        }))
        .unwrap();
        let record = EvidenceRecord::from(raw);
        assert!(record.category.is_none());
        assert_eq!(record.client_id.as_deref(), Some("c1"));
    }

    #[test]
    fn known_category_maps_to_enum() {
        let raw: RawEvidence =
            serde_json::from_value(serde_json::json!({"_id": "e1", "category": "Case Study"}))
                .unwrap();
        assert_eq!(
            EvidenceRecord::from(raw).category,
            Some(EvidenceCategory::CaseStudy)
        );
    }
}
