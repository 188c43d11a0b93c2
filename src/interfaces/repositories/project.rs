use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::project::{Project, ProjectInsert, ProjectRow},
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

const PROJECT_COLUMNS: &str = "id, title, description, features, technologies, github_url, \
    live_url, image, category, featured, created_at, updated_at";

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create_project(&self, project: &ProjectInsert) -> Result<Uuid, AppError>;
    async fn get_project_by_id(&self, id: &Uuid) -> Result<Project, AppError>;
    /// Newest first.
    async fn list_projects(&self) -> Result<Vec<Project>, AppError>;
}

#[async_trait]
impl<T> ProjectRepository for Arc<T>
where
    T: ProjectRepository + ?Sized,
{
    async fn create_project(&self, project: &ProjectInsert) -> Result<Uuid, AppError> {
        (**self).create_project(project).await
    }

    async fn get_project_by_id(&self, id: &Uuid) -> Result<Project, AppError> {
        (**self).get_project_by_id(id).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        (**self).list_projects().await
    }
}

impl SqlxProjectRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn create_project(&self, project: &ProjectInsert) -> Result<Uuid, AppError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO projects (
                id, title, description, features, technologies, github_url,
                live_url, image, category, featured, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.features)
        .bind(&project.technologies)
        .bind(&project.github_url)
        .bind(&project.live_url)
        .bind(&project.image)
        .bind(project.category.as_str())
        .bind(project.featured)
        .bind(project.created_at)
        .bind(project.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn get_project_by_id(&self, id: &Uuid) -> Result<Project, AppError> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");

        let row = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

        Project::try_from(row)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC");

        sqlx::query_as::<_, ProjectRow>(&query)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Project::try_from)
            .collect()
    }
}
