pub mod contact;
pub mod memory;
pub mod notifier;
pub mod project;
pub mod sqlx_repo;
