//! Projects and case studies.

use bidgate_core::entities::{Project, ProjectCaseStudy};

use crate::mapper::{RawCaseStudy, RawProject, fields, types};
use crate::{Direction, Query, RecordStore, StoreError};

/// Projects returned per client listing.
pub const MAX_PROJECTS: u32 = 100;

impl RecordStore {
    /// A client's projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the list request fails.
    pub async fn list_projects_for_client(
        &self,
        client_id: &str,
    ) -> Result<Vec<Project>, StoreError> {
        let query = Query::new()
            .equals(fields::CLIENT, client_id)
            .sort_by(fields::CREATED_DATE, Direction::Descending)
            .limit(MAX_PROJECTS);
        self.list_mapped::<RawProject, Project>(types::PROJECT, &query)
            .await
    }

    /// Fetch one project by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the request fails.
    pub async fn get_project(&self, id: &str) -> Result<Option<Project>, StoreError> {
        Ok(self
            .get::<RawProject>(types::PROJECT, id)
            .await?
            .map(Project::from))
    }

    /// Case studies of a project with enrichment fields copied from the project.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if either request fails.
    pub async fn list_case_studies(
        &self,
        project_id: &str,
    ) -> Result<Vec<ProjectCaseStudy>, StoreError> {
        let project = self.get_project(project_id).await?;
        let query = Query::new().equals(fields::PROJECT, project_id);
        let mut studies = self
            .list_mapped::<RawCaseStudy, ProjectCaseStudy>(types::PROJECT_CASE_STUDY, &query)
            .await?;
        if let Some(project) = &project {
            for study in &mut studies {
                study.enrich_from(project);
            }
        }
        Ok(studies)
    }
}
