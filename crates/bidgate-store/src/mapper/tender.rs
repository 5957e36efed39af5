use bidgate_core::entities::{Tender, TenderQuestion};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::flex;

#[derive(Debug, Deserialize)]
pub struct RawTender {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default, alias = "name", deserialize_with = "flex::opt_string")]
    tender_name: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    client: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    status: Option<String>,
    #[serde(
        rename = "Created Date",
        default,
        deserialize_with = "flex::opt_datetime"
    )]
    created_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "flex::list_len")]
    questions: usize,
}

impl From<RawTender> for Tender {
    fn from(raw: RawTender) -> Self {
        Self {
            id: raw.id,
            name: raw.tender_name,
            client_id: raw.client,
            status: raw.status,
            created_at: raw.created_date,
            question_count: raw.questions,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RawQuestion {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default, deserialize_with = "flex::opt_string")]
    tender: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    question_number: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    question_text: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    answer_text: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    evaluation: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    evaluation_final: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    section: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_string")]
    status: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_u32")]
    word_limit: Option<u32>,
    #[serde(default, deserialize_with = "flex::opt_f64")]
    weighting: Option<f64>,
}

impl From<RawQuestion> for TenderQuestion {
    fn from(raw: RawQuestion) -> Self {
        Self {
            id: raw.id,
            tender_id: raw.tender,
            question_number: raw.question_number,
            question_text: raw.question_text,
            answer_text: raw.answer_text,
            evaluation: raw.evaluation,
            final_evaluation: raw.evaluation_final,
            section: raw.section,
            status: raw.status,
            word_limit: raw.word_limit,
            weighting: raw.weighting,
        }
    }
}
