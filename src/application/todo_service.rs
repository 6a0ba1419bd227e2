use std::sync::Arc;

use async_trait::async_trait;

use super::error::{AppError, AppResult, required};
use crate::domain::{
    project::ProjectId,
    repository::{ProjectRepository, TodoRepository},
    todo::{CreateTodo, Todo, TodoId, TodoInput, UpdateTodo},
};

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn list_all(&self) -> AppResult<Vec<Todo>>;
    async fn list_by_project(&self, project_id: &ProjectId) -> AppResult<Vec<Todo>>;
    async fn create(&self, project_id: &ProjectId, input: TodoInput) -> AppResult<Todo>;
    async fn get(&self, id: &TodoId) -> AppResult<Todo>;
    async fn update(&self, id: &TodoId, input: TodoInput) -> AppResult<Todo>;
    async fn delete(&self, id: &TodoId) -> AppResult<()>;
}

#[derive(Clone)]
pub struct TodoServiceImpl {
    projects: Arc<dyn ProjectRepository>,
    todos: Arc<dyn TodoRepository>,
}

impl TodoServiceImpl {
    pub fn new(projects: Arc<dyn ProjectRepository>, todos: Arc<dyn TodoRepository>) -> Self {
        Self { projects, todos }
    }

    async fn ensure_project(&self, id: &ProjectId) -> AppResult<()> {
        match self.projects.get(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound),
        }
    }
}

#[async_trait]
impl TodoService for TodoServiceImpl {
    async fn list_all(&self) -> AppResult<Vec<Todo>> { Ok(self.todos.list().await?) }

    async fn list_by_project(&self, project_id: &ProjectId) -> AppResult<Vec<Todo>> {
        self.ensure_project(project_id).await?;
        Ok(self.todos.list_by_project(project_id).await?)
    }

    async fn create(&self, project_id: &ProjectId, input: TodoInput) -> AppResult<Todo> {
        self.ensure_project(project_id).await?;
        let title = required(input.title, "title")?;
        let todo = self
            .todos
            .create(CreateTodo {
                project_id: project_id.clone(),
                title,
                completed: input.completed.unwrap_or(false),
                due_date: input.due_date,
            })
            .await?;
        tracing::debug!(id = %todo.id, project = %project_id, "todo created");
        Ok(todo)
    }

    async fn get(&self, id: &TodoId) -> AppResult<Todo> {
        self.todos.get(id).await?.ok_or(AppError::NotFound)
    }

    async fn update(&self, id: &TodoId, input: TodoInput) -> AppResult<Todo> {
        // A blank title is dropped like any other unusable field.
        let title = input.title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
        let patch = UpdateTodo { title, completed: input.completed, due_date: input.due_date };
        self.todos.update(id, patch).await?.ok_or(AppError::NotFound)
    }

    async fn delete(&self, id: &TodoId) -> AppResult<()> {
        if self.todos.delete(id).await? { Ok(()) } else { Err(AppError::NotFound) }
    }
}
