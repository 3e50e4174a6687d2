//! `PostgreSQL` adapters for task and evidence persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTaskRepository, TaskPgPool};
