//! Diesel row models for tenant reference data.

use super::schema::{controls, frameworks, organizations};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Insert model for organization records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = organizations)]
pub struct NewOrganizationRow {
    /// Organization identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for framework records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = frameworks)]
pub struct NewFrameworkRow {
    /// Framework identifier.
    pub id: uuid::Uuid,
    /// Owning organization.
    pub organization_id: uuid::Uuid,
    /// Framework name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for control records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = controls)]
pub struct NewControlRow {
    /// Control identifier.
    pub id: uuid::Uuid,
    /// Owning framework.
    pub framework_id: uuid::Uuid,
    /// Control code.
    pub code: String,
    /// Control title.
    pub title: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
