//! Application services for tenant-scoped task and evidence operations.

mod error;
mod evidence;
mod tasks;

pub use error::{TaskServiceError, TaskServiceResult};
pub use evidence::{CreateEvidenceRequest, EvidenceService};
pub use tasks::{CreateTaskRequest, TaskDetails, TaskListing, TaskService};
