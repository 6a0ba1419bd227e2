use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::project::ProjectId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TodoId(pub String);

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub project_id: ProjectId,
    pub title: String,
    pub completed: bool,
    pub due_date: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateTodo {
    pub project_id: ProjectId,
    pub title: String,
    pub completed: bool,
    pub due_date: Option<String>,
}

/// Each `Some` field replaces the stored value; `None` keeps it.
#[derive(Debug, Clone, Default)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<String>,
}

impl Todo {
    pub fn apply(&mut self, input: UpdateTodo) {
        if let Some(t) = input.title { self.title = t; }
        if let Some(c) = input.completed { self.completed = c; }
        if let Some(d) = input.due_date { self.due_date = Some(d); }
    }
}

/// Fields as supplied by a client. Anything missing or of the wrong type
/// has already been dropped to `None`.
#[derive(Debug, Clone, Default)]
pub struct TodoInput {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<String>,
}
