//! Controls: individual requirements within a framework.

use super::{ControlId, FrameworkId, TenancyDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Control code such as `AC-01`, unique within its framework.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlCode(String);

impl ControlCode {
    /// Creates a validated control code.
    ///
    /// # Errors
    ///
    /// Returns [`TenancyDomainError::InvalidControlCode`] when the code is
    /// empty or contains inner whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, TenancyDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() || normalized.chars().any(char::is_whitespace) {
            return Err(TenancyDomainError::InvalidControlCode(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the code as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ControlCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A compliance requirement defined by a framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    id: ControlId,
    framework_id: FrameworkId,
    code: ControlCode,
    title: String,
    created_at: DateTime<Utc>,
}

impl Control {
    /// Creates a new control within a framework.
    ///
    /// # Errors
    ///
    /// Returns a [`TenancyDomainError`] when the code or title is invalid.
    pub fn new(
        framework_id: FrameworkId,
        code: &str,
        title: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, TenancyDomainError> {
        let code = ControlCode::new(code)?;
        let raw_title = title.into();
        let trimmed = raw_title.trim();
        if trimmed.is_empty() {
            return Err(TenancyDomainError::EmptyControlTitle);
        }
        Ok(Self {
            id: ControlId::new(),
            framework_id,
            code,
            title: trimmed.to_owned(),
            created_at: clock.utc(),
        })
    }

    /// Returns the control identifier.
    #[must_use]
    pub const fn id(&self) -> ControlId {
        self.id
    }

    /// Returns the owning framework.
    #[must_use]
    pub const fn framework_id(&self) -> FrameworkId {
        self.framework_id
    }

    /// Returns the control code.
    #[must_use]
    pub const fn code(&self) -> &ControlCode {
        &self.code
    }

    /// Returns the control title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
