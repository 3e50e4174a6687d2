//! Persistence adapters for tasks and evidence.
//!
//! - [`memory::InMemoryTaskRepository`]: thread-safe in-memory storage for
//!   tests
//! - [`postgres::PostgresTaskRepository`]: `PostgreSQL` persistence using
//!   Diesel ORM
//!
//! Each adapter implements both [`TaskRepository`] and
//! [`EvidenceRepository`] over shared storage so evidence scoping can see
//! the owning task.
//!
//! [`TaskRepository`]: crate::task::ports::TaskRepository
//! [`EvidenceRepository`]: crate::task::ports::EvidenceRepository

pub mod memory;
pub mod postgres;
