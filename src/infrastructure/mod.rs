pub mod memory_repo;
pub mod token_registry;
