//! Document upload for tender analysis.

use axum::Json;
use axum::extract::{Multipart, State};
use bidgate_analysis::{AnalysisPayload, Upload, classify};
use bidgate_core::evidence::{CategoryCount, aggregate, total};
use bidgate_core::responses::AnalysisResponse;

use super::optional;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Default)]
struct Form {
    file: Option<(String, Vec<u8>)>,
    client_id: Option<String>,
    tender_name: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<Form, ApiError> {
    let mut form = Form::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                form.file = Some((file_name, bytes.to_vec()));
            }
            Some("clientId") => form.client_id = optional(Some(field.text().await?.as_str())),
            Some("tenderName") => form.tender_name = optional(Some(field.text().await?.as_str())),
            _ => {}
        }
    }
    Ok(form)
}

/// Evidence tally for the payload. A failed lookup sends an empty tally
/// rather than blocking the analysis.
async fn evidence_counts(state: &AppState, client_id: &str) -> Vec<CategoryCount> {
    match state.store.list_evidence_for_client(client_id).await {
        Ok(records) => aggregate(records.into_iter().filter_map(|r| r.category)),
        Err(error) => {
            tracing::warn!(%client_id, %error, "evidence lookup failed; analysing without counts");
            Vec::new()
        }
    }
}

pub async fn analyse(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let analysis = state.analysis()?.clone();
    let form = read_form(multipart).await?;
    let (file_name, bytes) = form
        .file
        .ok_or_else(|| ApiError::Validation("file is required".into()))?;
    let client_id = form
        .client_id
        .ok_or_else(|| ApiError::Validation("clientId is required".into()))?;
    let tender_name = form.tender_name.unwrap_or_default();
    // Reject unsupported uploads before the evidence lookup.
    classify(&file_name)?;

    let counts = evidence_counts(&state, &client_id).await;
    let local_total = total(&counts);
    let payload = AnalysisPayload::build(
        &Upload {
            file_name: &file_name,
            bytes: &bytes,
        },
        &client_id,
        &tender_name,
        counts,
        analysis.max_text_chars,
    )?;
    let outcome = analysis.dispatcher.dispatch(&payload).await?;

    let local_counts = serde_json::to_value(&payload.evidence_counts)
        .map_err(|e| ApiError::Upstream(format!("encode evidence counts: {e}")))?;
    Ok(Json(AnalysisResponse {
        success: outcome.success,
        analysis: outcome.analysis,
        tender_name,
        evidence_counts: outcome.evidence_counts.unwrap_or(local_counts),
        total_evidence: outcome
            .total_evidence
            .unwrap_or_else(|| serde_json::Value::from(local_total)),
    }))
}
