use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A past contract in a client's bid history.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Project {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A written case study derived from a [`Project`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ProjectCaseStudy {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl ProjectCaseStudy {
    /// Copy enrichment fields from the parent project where this case study has none.
    pub fn enrich_from(&mut self, project: &Project) {
        if self.sector.is_none() {
            self.sector.clone_from(&project.sector);
        }
        if self.buyer.is_none() {
            self.buyer.clone_from(&project.buyer);
        }
        if self.contract_value.is_none() {
            self.contract_value = project.contract_value;
        }
        if self.region.is_none() {
            self.region.clone_from(&project.region);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn enrichment_fills_only_missing_fields() {
        let project = Project {
            id: "p1".into(),
            sector: Some("Health".into()),
            buyer: Some("NHS Trust".into()),
            contract_value: Some(250_000.0),
            region: Some("North West".into()),
            ..Default::default()
        };
        let mut study = ProjectCaseStudy {
            id: "s1".into(),
            sector: Some("Local Government".into()),
            ..Default::default()
        };

        study.enrich_from(&project);

        assert_eq!(study.sector.as_deref(), Some("Local Government"));
        assert_eq!(study.buyer.as_deref(), Some("NHS Trust"));
        assert_eq!(study.contract_value, Some(250_000.0));
        assert_eq!(study.region.as_deref(), Some("North West"));
    }
}
