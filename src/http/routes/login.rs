use axum::{Json, response::{IntoResponse, Response}};

use crate::{application::error::AppResult, http::routing::AppState};

pub async fn login(state: &AppState, authorization: Option<&str>) -> AppResult<Response> {
    let issued = state.auth.login(authorization).await?;
    Ok(Json(issued).into_response())
}
