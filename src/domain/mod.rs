pub mod project;
pub mod repository;
pub mod todo;
