use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::application::error::AppError;

/// Body of every 401.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError { pub error: String }

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MissingCredentials | AppError::InvalidCredentials | AppError::InvalidOrExpiredToken => {
                (StatusCode::UNAUTHORIZED, axum::Json(ApiError { error: self.to_string() })).into_response()
            }
            // Validation and lookup failures are plain text, not `ApiError`.
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            AppError::Internal(e) => {
                tracing::error!(error = ?e, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}

/// A request body read leniently: anything that isn't a JSON object
/// counts as an empty one, and fields of the wrong type count as missing.
#[derive(Debug, Clone, Default)]
pub struct JsonBody(Map<String, Value>);

impl JsonBody {
    pub fn parse(bytes: &[u8]) -> Self {
        match serde_json::from_slice(bytes) {
            Ok(Value::Object(map)) => Self(map),
            _ => Self::default(),
        }
    }

    pub fn string(&self, field: &str) -> Option<String> {
        self.0.get(field).and_then(Value::as_str).map(str::to_owned)
    }

    pub fn bool(&self, field: &str) -> Option<bool> {
        self.0.get(field).and_then(Value::as_bool)
    }
}
