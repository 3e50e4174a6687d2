//! Organization aggregate: the tenant root.

use super::{OrganizationId, TenancyDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Tenant root owning frameworks and tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    id: OrganizationId,
    name: String,
    created_at: DateTime<Utc>,
}

impl Organization {
    /// Creates a new organization with a server-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TenancyDomainError::EmptyOrganizationName`] when the name is
    /// blank.
    pub fn new(name: impl Into<String>, clock: &impl Clock) -> Result<Self, TenancyDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TenancyDomainError::EmptyOrganizationName);
        }
        Ok(Self {
            id: OrganizationId::new(),
            name: trimmed.to_owned(),
            created_at: clock.utc(),
        })
    }

    /// Returns the organization identifier.
    #[must_use]
    pub const fn id(&self) -> OrganizationId {
        self.id
    }

    /// Returns the organization name.
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
