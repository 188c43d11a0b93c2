use uuid::Uuid;

use crate::{
    entities::project::{NewProject, Project, ProjectInsert},
    errors::AppError,
    repositories::project::ProjectRepository,
    use_cases::showcase::{build_showcase, ShowcaseQuery, ShowcaseResponse},
    utils::valid_uuid::valid_uuid,
};

pub struct ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub project_repo: R,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub fn new(project_repo: R) -> Self {
        ProjectHandler { project_repo }
    }

    /// Validates and stores a project record. Used by seeding and admin tooling.
    pub async fn create_project(&self, request: NewProject) -> Result<Uuid, AppError> {
        let insert = ProjectInsert::try_from(request)?;
        self.project_repo.create_project(&insert).await
    }

    pub async fn get_project_by_id(&self, id: &str) -> Result<Project, AppError> {
        let valid_id = valid_uuid(id)?;
        self.project_repo.get_project_by_id(&valid_id).await
    }

    /// The stored catalog as-is; an empty store yields an empty list.
    pub async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_projects().await
    }

    /// Catalog view for the projects section, with the fallback list applied
    /// when the store is empty or unreachable.
    pub async fn showcase(&self, query: &ShowcaseQuery) -> Result<ShowcaseResponse, AppError> {
        let fetched = self.project_repo.list_projects().await;
        build_showcase(fetched, query)
    }
}
