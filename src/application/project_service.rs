use std::sync::Arc;

use async_trait::async_trait;

use super::error::{AppError, AppResult, required};
use crate::domain::{
    project::{CreateProject, Project, ProjectId, UpdateProject},
    repository::ProjectRepository,
};

#[async_trait]
pub trait ProjectService: Send + Sync + 'static {
    async fn list(&self) -> AppResult<Vec<Project>>;
    async fn create(&self, name: Option<String>) -> AppResult<Project>;
    async fn get(&self, id: &ProjectId) -> AppResult<Project>;
    async fn update(&self, id: &ProjectId, name: Option<String>) -> AppResult<Project>;
    async fn delete(&self, id: &ProjectId) -> AppResult<()>;
}

#[derive(Clone)]
pub struct ProjectServiceImpl {
    repo: Arc<dyn ProjectRepository>,
}

impl ProjectServiceImpl {
    pub fn new(repo: Arc<dyn ProjectRepository>) -> Self { Self { repo } }
}

#[async_trait]
impl ProjectService for ProjectServiceImpl {
    async fn list(&self) -> AppResult<Vec<Project>> { Ok(self.repo.list().await?) }

    async fn create(&self, name: Option<String>) -> AppResult<Project> {
        let name = required(name, "name")?;
        let project = self.repo.create(CreateProject { name }).await?;
        tracing::debug!(id = %project.id, "project created");
        Ok(project)
    }

    async fn get(&self, id: &ProjectId) -> AppResult<Project> {
        self.repo.get(id).await?.ok_or(AppError::NotFound)
    }

    async fn update(&self, id: &ProjectId, name: Option<String>) -> AppResult<Project> {
        if self.repo.get(id).await?.is_none() {
            return Err(AppError::NotFound);
        }
        let name = required(name, "name")?;
        self.repo.update(id, UpdateProject { name }).await?.ok_or(AppError::NotFound)
    }

    async fn delete(&self, id: &ProjectId) -> AppResult<()> {
        // Child todos are left in place and keep pointing at this id.
        if self.repo.delete(id).await? { Ok(()) } else { Err(AppError::NotFound) }
    }
}
