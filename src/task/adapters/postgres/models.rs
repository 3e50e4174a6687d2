//! Diesel row models for task and evidence persistence.

use super::schema::{evidence, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row model for task records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning organization.
    pub organization_id: uuid::Uuid,
    /// Referenced control.
    pub control_id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Category storage value.
    pub category: String,
    /// Status storage value.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied by task updates.
///
/// `None` fields are left out of the `UPDATE`. For `description`,
/// `Some(None)` writes `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// New control reference.
    pub control_id: Option<uuid::Uuid>,
    /// New task name.
    pub name: Option<String>,
    /// New description, or `Some(None)` to clear it.
    pub description: Option<Option<String>>,
    /// New category storage value.
    pub category: Option<String>,
    /// New status storage value.
    pub status: Option<String>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Row model for evidence records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = evidence)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EvidenceRow {
    /// Evidence identifier.
    pub id: uuid::Uuid,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Evidence type storage value.
    pub evidence_type: String,
    /// Optional note.
    pub note: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
