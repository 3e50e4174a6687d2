//! Compliance framework scoped to one organization.

use super::{FrameworkId, OrganizationId, TenancyDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Named compliance framework owned by a single organization.
///
/// Framework names are unique per organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Framework {
    id: FrameworkId,
    organization_id: OrganizationId,
    name: String,
    created_at: DateTime<Utc>,
}

impl Framework {
    /// Creates a new framework for the given organization.
    ///
    /// # Errors
    ///
    /// Returns [`TenancyDomainError::EmptyFrameworkName`] when the name is
    /// blank.
    pub fn new(
        organization_id: OrganizationId,
        name: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, TenancyDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TenancyDomainError::EmptyFrameworkName);
        }
        Ok(Self {
            id: FrameworkId::new(),
            organization_id,
            name: trimmed.to_owned(),
            created_at: clock.utc(),
        })
    }

    /// Returns the framework identifier.
    #[must_use]
    pub const fn id(&self) -> FrameworkId {
        self.id
    }

    /// Returns the owning organization.
    #[must_use]
    pub const fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    /// Returns the framework name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
