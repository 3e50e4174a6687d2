//! Task aggregate root and partial-update model.

use super::{TaskCategory, TaskDomainError, TaskId, TaskStatus};
use crate::tenancy::domain::{ControlId, OrganizationId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated task name: non-empty after trimming and at most
/// [`TaskName::MAX_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskName(String);

impl TaskName {
    /// Largest name accepted by the `tasks.name` column.
    pub const MAX_CHARS: usize = 255;

    /// Creates a validated task name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskName`] for blank names and
    /// [`TaskDomainError::TaskNameTooLong`] when the trimmed name exceeds
    /// [`TaskName::MAX_CHARS`].
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTaskName);
        }
        let actual = trimmed.chars().count();
        if actual > Self::MAX_CHARS {
            return Err(TaskDomainError::TaskNameTooLong {
                max: Self::MAX_CHARS,
                actual,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parameter object for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Owning organization.
    pub organization_id: OrganizationId,
    /// Control the task addresses.
    pub control_id: ControlId,
    /// Validated task name.
    pub name: TaskName,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Task category.
    pub category: TaskCategory,
    /// Initial status, [`TaskStatus::Open`] when not specified.
    pub status: Option<TaskStatus>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    organization_id: OrganizationId,
    control_id: ControlId,
    name: TaskName,
    description: Option<String>,
    category: TaskCategory,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning organization.
    pub organization_id: OrganizationId,
    /// Persisted control reference.
    pub control_id: ControlId,
    /// Persisted name.
    pub name: TaskName,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted category.
    pub category: TaskCategory,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task with a server-assigned identifier and timestamps.
    #[must_use]
    pub fn new(data: NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            organization_id: data.organization_id,
            control_id: data.control_id,
            name: data.name,
            description: data.description,
            category: data.category,
            status: data.status.unwrap_or_default(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            organization_id: data.organization_id,
            control_id: data.control_id,
            name: data.name,
            description: data.description,
            category: data.category,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning organization.
    #[must_use]
    pub const fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    /// Returns the referenced control.
    #[must_use]
    pub const fn control_id(&self) -> ControlId {
        self.control_id
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the task category.
    #[must_use]
    pub const fn category(&self) -> TaskCategory {
        self.category
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies every field present in `changes`, including its
    /// `updated_at`.
    pub fn apply_changes(&mut self, changes: &TaskChanges) {
        if let Some(new_control) = changes.control_id {
            self.control_id = new_control;
        }
        if let Some(new_name) = &changes.name {
            self.name = new_name.clone();
        }
        if let Some(new_description) = &changes.description {
            self.description.clone_from(new_description);
        }
        if let Some(new_category) = changes.category {
            self.category = new_category;
        }
        if let Some(new_status) = changes.status {
            self.status = new_status;
        }
        self.updated_at = changes.updated_at;
    }
}

/// Partial update for a task.
///
/// `None` leaves a field unchanged. For `description`, `Some(None)` clears
/// the stored description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// New control reference.
    pub control_id: Option<ControlId>,
    /// New name, validated when applied.
    pub name: Option<String>,
    /// New description, or `Some(None)` to clear it.
    pub description: Option<Option<String>>,
    /// New category.
    pub category: Option<TaskCategory>,
    /// New status.
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    /// Returns `true` when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.control_id.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.status.is_none()
    }

    /// Validates the patch and stamps it with the current clock time.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskDomainError`] when the patched name is invalid.
    pub fn into_changes(self, clock: &impl Clock) -> Result<TaskChanges, TaskDomainError> {
        let Self {
            control_id,
            name,
            description,
            category,
            status,
        } = self;
        Ok(TaskChanges {
            control_id,
            name: name.map(TaskName::new).transpose()?,
            description,
            category,
            status,
            updated_at: clock.utc(),
        })
    }
}

/// Validated field changes for a stored task.
///
/// Repositories write only the fields that are set, so concurrent changes
/// to other fields survive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    /// New control reference.
    pub control_id: Option<ControlId>,
    /// New name.
    pub name: Option<TaskName>,
    /// New description, or `Some(None)` to clear it.
    pub description: Option<Option<String>>,
    /// New category.
    pub category: Option<TaskCategory>,
    /// New status.
    pub status: Option<TaskStatus>,
    /// Timestamp recorded as `updated_at`.
    pub updated_at: DateTime<Utc>,
}
