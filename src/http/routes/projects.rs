use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};

use crate::{
    application::error::{AppError, AppResult},
    domain::project::ProjectId,
    http::{routing::{AppState, table::PathParams}, types::JsonBody},
};

fn project_id(params: &PathParams) -> AppResult<ProjectId> {
    params.get("id").map(|id| ProjectId(id.to_owned())).ok_or(AppError::NotFound)
}

pub async fn list(state: &AppState) -> AppResult<Response> {
    Ok(Json(state.projects.list().await?).into_response())
}

pub async fn create(state: &AppState, body: &JsonBody) -> AppResult<Response> {
    let project = state.projects.create(body.string("name")).await?;
    Ok((StatusCode::CREATED, Json(project)).into_response())
}

pub async fn get(state: &AppState, params: &PathParams) -> AppResult<Response> {
    Ok(Json(state.projects.get(&project_id(params)?).await?).into_response())
}

pub async fn update(state: &AppState, params: &PathParams, body: &JsonBody) -> AppResult<Response> {
    let project = state.projects.update(&project_id(params)?, body.string("name")).await?;
    Ok(Json(project).into_response())
}

pub async fn delete(state: &AppState, params: &PathParams) -> AppResult<Response> {
    state.projects.delete(&project_id(params)?).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
