use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};

use crate::{
    application::error::{AppError, AppResult},
    domain::{project::ProjectId, todo::{TodoId, TodoInput}},
    http::{routing::{AppState, table::PathParams}, types::JsonBody},
};

fn id(params: &PathParams) -> AppResult<String> {
    params.get("id").map(str::to_owned).ok_or(AppError::NotFound)
}

fn input(body: &JsonBody) -> TodoInput {
    TodoInput { title: body.string("title"), completed: body.bool("completed"), due_date: body.string("dueDate") }
}

pub async fn list_all(state: &AppState) -> AppResult<Response> {
    Ok(Json(state.todos.list_all().await?).into_response())
}

pub async fn list_by_project(state: &AppState, params: &PathParams) -> AppResult<Response> {
    let todos = state.todos.list_by_project(&ProjectId(id(params)?)).await?;
    Ok(Json(todos).into_response())
}

pub async fn create(state: &AppState, params: &PathParams, body: &JsonBody) -> AppResult<Response> {
    let todo = state.todos.create(&ProjectId(id(params)?), input(body)).await?;
    Ok((StatusCode::CREATED, Json(todo)).into_response())
}

pub async fn get(state: &AppState, params: &PathParams) -> AppResult<Response> {
    Ok(Json(state.todos.get(&TodoId(id(params)?)).await?).into_response())
}

pub async fn update(state: &AppState, params: &PathParams, body: &JsonBody) -> AppResult<Response> {
    Ok(Json(state.todos.update(&TodoId(id(params)?), input(body)).await?).into_response())
}

pub async fn delete(state: &AppState, params: &PathParams) -> AppResult<Response> {
    state.todos.delete(&TodoId(id(params)?)).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
