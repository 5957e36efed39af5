use bidgate_core::entities::{Project, ProjectCaseStudy};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::flex;

#[derive(Debug, Deserialize)]
pub struct RawProject {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default, alias = "name", deserialize_with = "flex::opt_string")]
    project_name: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    client: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    description: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    sector: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    buyer: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_f64")]
    contract_value: Option<f64>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    region: Option<String>,
    #[serde(
        rename = "Created Date",
        default,
        deserialize_with = "flex::opt_datetime"
    )]
    created_date: Option<DateTime<Utc>>,
}

impl From<RawProject> for Project {
    fn from(raw: RawProject) -> Self {
        Self {
            id: raw.id,
            name: raw.project_name,
            client_id: raw.client,
            description: raw.description,
            sector: raw.sector,
            buyer: raw.buyer,
            contract_value: raw.contract_value,
            region: raw.region,
            created_at: raw.created_date,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RawCaseStudy {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default, deserialize_with = "flex::opt_string")]
    project: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    title: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    summary: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    outcome: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    sector: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    buyer: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_f64")]
    contract_value: Option<f64>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    region: Option<String>,
}

impl From<RawCaseStudy> for ProjectCaseStudy {
    fn from(raw: RawCaseStudy) -> Self {
        Self {
            id: raw.id,
            project_id: raw.project,
            title: raw.title,
            summary: raw.summary,
            outcome: raw.outcome,
            sector: raw.sector,
            buyer: raw.buyer,
            contract_value: raw.contract_value,
            region: raw.region,
        }
    }
}
