pub mod table;

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    extract::{Request, State},
    response::{IntoResponse, Response},
};
use http::{Method, StatusCode};

use self::table::{PathParams, RouteTable};
use super::{auth, routes::{self, projects, todos}, types::JsonBody};
use crate::application::{
    auth_service::AuthService,
    error::AppResult,
    project_service::{ProjectService, ProjectServiceImpl},
    todo_service::{TodoService, TodoServiceImpl},
};
use crate::infrastructure::memory_repo::{InMemoryProjectRepository, InMemoryTodoRepository};

const BODY_LIMIT: usize = 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub projects: Arc<dyn ProjectService>,
    pub todos: Arc<dyn TodoService>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// Fresh, empty in-memory stores.
    pub fn in_memory(auth: AuthService) -> Self {
        let projects = Arc::new(InMemoryProjectRepository::new());
        let todos = Arc::new(InMemoryTodoRepository::new());
        Self {
            projects: Arc::new(ProjectServiceImpl::new(projects.clone())),
            todos: Arc::new(TodoServiceImpl::new(projects, todos)),
            auth: Arc::new(auth),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    ListProjects,
    CreateProject,
    GetProject,
    UpdateProject,
    DeleteProject,
    ListProjectTodos,
    CreateProjectTodo,
    ListTodos,
    GetTodo,
    UpdateTodo,
    DeleteTodo,
}

/// The service's routes, in match order.
pub fn route_table() -> RouteTable<Endpoint> {
    RouteTable::new()
        .route(Method::POST, "/login", Endpoint::Login)
        .route(Method::GET, "/projects", Endpoint::ListProjects)
        .route(Method::POST, "/projects", Endpoint::CreateProject)
        .route(Method::GET, "/projects/{id}/todos", Endpoint::ListProjectTodos)
        .route(Method::POST, "/projects/{id}/todos", Endpoint::CreateProjectTodo)
        .route(Method::GET, "/projects/{id}", Endpoint::GetProject)
        .route(Method::PUT, "/projects/{id}", Endpoint::UpdateProject)
        .route(Method::DELETE, "/projects/{id}", Endpoint::DeleteProject)
        .route(Method::GET, "/todos", Endpoint::ListTodos)
        .route(Method::GET, "/todos/{id}", Endpoint::GetTodo)
        .route(Method::PUT, "/todos/{id}", Endpoint::UpdateTodo)
        .route(Method::DELETE, "/todos/{id}", Endpoint::DeleteTodo)
}

#[derive(Clone)]
struct Dispatcher {
    routes: Arc<RouteTable<Endpoint>>,
    state: AppState,
}

pub fn app(state: AppState) -> Router {
    let dispatcher = Dispatcher { routes: Arc::new(route_table()), state };
    Router::new().fallback(dispatch).with_state(dispatcher)
}

async fn dispatch(State(dispatcher): State<Dispatcher>, req: Request) -> Response {
    let (parts, body) = req.into_parts();
    let path = parts.uri.path().to_owned();
    let response = match dispatcher.routes.resolve(&parts.method, &path) {
        None => StatusCode::NOT_FOUND.into_response(),
        Some((endpoint, params)) => {
            let authorization = auth::authorization(&parts.headers);
            handle(&dispatcher.state, endpoint, &params, authorization, &parts.method, body)
                .await
                .unwrap_or_else(|e| e.into_response())
        }
    };
    tracing::info!(method = %parts.method, %path, status = response.status().as_u16(), "request");
    response
}

async fn handle(
    state: &AppState,
    endpoint: Endpoint,
    params: &PathParams,
    authorization: Option<&str>,
    method: &Method,
    body: Body,
) -> AppResult<Response> {
    if endpoint != Endpoint::Login {
        auth::gate(state, authorization).await?;
    }

    let body = if *method == Method::POST || *method == Method::PUT {
        match to_bytes(body, BODY_LIMIT).await {
            Ok(bytes) => JsonBody::parse(&bytes),
            Err(e) => {
                tracing::debug!(error = %e, "unreadable body treated as empty");
                JsonBody::default()
            }
        }
    } else {
        JsonBody::default()
    };

    match endpoint {
        Endpoint::Login => routes::login::login(state, authorization).await,
        Endpoint::ListProjects => projects::list(state).await,
        Endpoint::CreateProject => projects::create(state, &body).await,
        Endpoint::GetProject => projects::get(state, params).await,
        Endpoint::UpdateProject => projects::update(state, params, &body).await,
        Endpoint::DeleteProject => projects::delete(state, params).await,
        Endpoint::ListProjectTodos => todos::list_by_project(state, params).await,
        Endpoint::CreateProjectTodo => todos::create(state, params, &body).await,
        Endpoint::ListTodos => todos::list_all(state).await,
        Endpoint::GetTodo => todos::get(state, params).await,
        Endpoint::UpdateTodo => todos::update(state, params, &body).await,
        Endpoint::DeleteTodo => todos::delete(state, params).await,
    }
}
