//! Domain model for compliance tasks and evidence.
//!
//! The task domain models task creation, partial updates, evidence
//! attachment and list queries while keeping all infrastructure concerns
//! outside of the domain boundary.

mod classification;
mod error;
mod evidence;
mod ids;
mod query;
mod task;

pub use classification::{EvidenceType, TaskCategory, TaskStatus};
pub use error::{ParseTaskValueError, TaskDomainError};
pub use evidence::{Evidence, NewEvidence};
pub use ids::{EvidenceId, TaskId};
pub use query::{DEFAULT_LIMIT, MAX_LIMIT, Pagination, TaskListQuery};
pub use task::{NewTask, PersistedTaskData, Task, TaskChanges, TaskName, TaskPatch};
