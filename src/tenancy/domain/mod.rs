//! Domain model for tenant reference data.
//!
//! Organizations, frameworks and controls are administratively managed and
//! never mutated by the task service layer.

mod control;
mod error;
mod framework;
mod ids;
mod organization;

pub use control::{Control, ControlCode};
pub use error::TenancyDomainError;
pub use framework::Framework;
pub use ids::{ControlId, FrameworkId, OrganizationId};
pub use organization::Organization;
