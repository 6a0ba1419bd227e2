use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::domain::{
    project::{CreateProject, Project, ProjectId, UpdateProject},
    repository::{ProjectRepository, TodoRepository},
    todo::{CreateTodo, Todo, TodoId, UpdateTodo},
};

/// A keyed collection with its own id counter. Entries are keyed by their
/// sequence number, so iteration follows insertion order.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<u64, T>,
    last_id: u64,
}

impl<T> Default for Table<T> {
    fn default() -> Self { Self { rows: BTreeMap::new(), last_id: 0 } }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }
}

// Ids are rendered counters. Only the exact rendering names a row, so
// `01` or `+1` never alias `1`.
fn key(id: &str) -> Option<u64> {
    id.parse::<u64>().ok().filter(|seq| seq.to_string() == id)
}

#[derive(Clone, Default)]
pub struct InMemoryProjectRepository {
    table: Arc<Mutex<Table<Project>>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn create(&self, input: CreateProject) -> Result<Project> {
        let mut table = self.table.lock().await;
        let seq = table.next_id();
        let project = Project { id: ProjectId(seq.to_string()), name: input.name, created_at: Utc::now() };
        table.rows.insert(seq, project.clone());
        Ok(project)
    }

    async fn get(&self, id: &ProjectId) -> Result<Option<Project>> {
        let Some(k) = key(&id.0) else { return Ok(None) };
        Ok(self.table.lock().await.rows.get(&k).cloned())
    }

    async fn list(&self) -> Result<Vec<Project>> {
        Ok(self.table.lock().await.rows.values().cloned().collect())
    }

    async fn update(&self, id: &ProjectId, input: UpdateProject) -> Result<Option<Project>> {
        let Some(k) = key(&id.0) else { return Ok(None) };
        let mut table = self.table.lock().await;
        Ok(table.rows.get_mut(&k).map(|p| {
            p.name = input.name;
            p.clone()
        }))
    }

    async fn delete(&self, id: &ProjectId) -> Result<bool> {
        let Some(k) = key(&id.0) else { return Ok(false) };
        Ok(self.table.lock().await.rows.remove(&k).is_some())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryTodoRepository {
    table: Arc<Mutex<Table<Todo>>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn create(&self, input: CreateTodo) -> Result<Todo> {
        let mut table = self.table.lock().await;
        let seq = table.next_id();
        let todo = Todo {
            id: TodoId(seq.to_string()),
            project_id: input.project_id,
            title: input.title,
            completed: input.completed,
            due_date: input.due_date,
            created_at: Utc::now(),
        };
        table.rows.insert(seq, todo.clone());
        Ok(todo)
    }

    async fn get(&self, id: &TodoId) -> Result<Option<Todo>> {
        let Some(k) = key(&id.0) else { return Ok(None) };
        Ok(self.table.lock().await.rows.get(&k).cloned())
    }

    async fn list(&self) -> Result<Vec<Todo>> {
        Ok(self.table.lock().await.rows.values().cloned().collect())
    }

    async fn list_by_project(&self, project_id: &ProjectId) -> Result<Vec<Todo>> {
        let table = self.table.lock().await;
        Ok(table.rows.values().filter(|t| &t.project_id == project_id).cloned().collect())
    }

    async fn update(&self, id: &TodoId, input: UpdateTodo) -> Result<Option<Todo>> {
        let Some(k) = key(&id.0) else { return Ok(None) };
        let mut table = self.table.lock().await;
        Ok(table.rows.get_mut(&k).map(|t| {
            t.apply(input);
            t.clone()
        }))
    }

    async fn delete(&self, id: &TodoId) -> Result<bool> {
        let Some(k) = key(&id.0) else { return Ok(false) };
        Ok(self.table.lock().await.rows.remove(&k).is_some())
    }
}
