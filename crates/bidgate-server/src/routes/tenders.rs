use axum::Json;
use axum::extract::{Path, State};
use bidgate_core::responses::{QuestionsResponse, TendersResponse};

use crate::error::ApiError;
use crate::policy::Endpoint;
use crate::state::AppState;

pub async fn for_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TendersResponse>, ApiError> {
    let result = state
        .store
        .list_tenders_for_client(&id)
        .await
        .map(|tenders| TendersResponse { tenders })
        .map_err(ApiError::from);
    Endpoint::ClientTenders
        .settle(result, TendersResponse::default)
        .map(Json)
}

pub async fn questions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<QuestionsResponse>, ApiError> {
    let result = state
        .store
        .list_questions_for_tender(&id)
        .await
        .map(|questions| QuestionsResponse { questions })
        .map_err(ApiError::from);
    Endpoint::TenderQuestions
        .settle(result, QuestionsResponse::default)
        .map(Json)
}
