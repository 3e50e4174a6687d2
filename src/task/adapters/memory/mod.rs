//! In-memory adapters for task and evidence persistence.

mod repository;

pub use repository::InMemoryTaskRepository;
