use axum::http::{HeaderMap, header::AUTHORIZATION};

use super::routing::AppState;
use crate::application::error::AppResult;

/// The raw `Authorization` header, if present and valid UTF-8.
pub fn authorization(headers: &HeaderMap) -> Option<&str> {
    headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok())
}

/// Runs before every handler except login.
pub async fn gate(state: &AppState, authorization: Option<&str>) -> AppResult<()> {
    state.auth.authorize(authorization).await.inspect_err(|e| {
        tracing::warn!(reason = %e, "request rejected");
    })
}
