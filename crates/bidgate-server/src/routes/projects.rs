use axum::Json;
use axum::extract::{Path, State};
use bidgate_core::responses::{CaseStudiesResponse, ProjectsResponse};

use crate::error::ApiError;
use crate::policy::Endpoint;
use crate::state::AppState;

pub async fn for_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectsResponse>, ApiError> {
    let result = state
        .store
        .list_projects_for_client(&id)
        .await
        .map(|projects| ProjectsResponse { projects })
        .map_err(ApiError::from);
    Endpoint::ClientProjects
        .settle(result, ProjectsResponse::default)
        .map(Json)
}

pub async fn case_studies(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CaseStudiesResponse>, ApiError> {
    let result = state
        .store
        .list_case_studies(&id)
        .await
        .map(|case_studies| CaseStudiesResponse { case_studies })
        .map_err(ApiError::from);
    Endpoint::ProjectCaseStudies
        .settle(result, CaseStudiesResponse::default)
        .map(Json)
}
