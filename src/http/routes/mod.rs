pub mod login;
pub mod projects;
pub mod todos;
