pub mod auth_service;
pub mod error;
pub mod project_service;
pub mod todo_service;
