use async_trait::async_trait;

use super::project::{CreateProject, Project, ProjectId, UpdateProject};
use super::todo::{CreateTodo, Todo, TodoId, UpdateTodo};

/// Identifiers are assigned by the repository from a counter that only
/// ever increases; a deleted id is never handed out again.
#[async_trait]
pub trait ProjectRepository: Send + Sync + 'static {
    async fn create(&self, input: CreateProject) -> anyhow::Result<Project>;
    async fn get(&self, id: &ProjectId) -> anyhow::Result<Option<Project>>;
    async fn list(&self) -> anyhow::Result<Vec<Project>>;
    async fn update(&self, id: &ProjectId, input: UpdateProject) -> anyhow::Result<Option<Project>>;
    async fn delete(&self, id: &ProjectId) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn create(&self, input: CreateTodo) -> anyhow::Result<Todo>;
    async fn get(&self, id: &TodoId) -> anyhow::Result<Option<Todo>>;
    async fn list(&self) -> anyhow::Result<Vec<Todo>>;
    async fn list_by_project(&self, project_id: &ProjectId) -> anyhow::Result<Vec<Todo>>;
    async fn update(&self, id: &TodoId, input: UpdateTodo) -> anyhow::Result<Option<Todo>>;
    async fn delete(&self, id: &TodoId) -> anyhow::Result<bool>;
}
