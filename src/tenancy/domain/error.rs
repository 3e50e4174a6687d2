//! Error types for tenancy domain validation.

use thiserror::Error;

/// Errors returned while constructing tenancy domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TenancyDomainError {
    /// The organization name is empty after trimming.
    #[error("organization name must not be empty")]
    EmptyOrganizationName,

    /// The framework name is empty after trimming.
    #[error("framework name must not be empty")]
    EmptyFrameworkName,

    /// The control code is empty or contains whitespace.
    #[error("invalid control code '{0}', expected a non-empty code without whitespace")]
    InvalidControlCode(String),

    /// The control title is empty after trimming.
    #[error("control title must not be empty")]
    EmptyControlTitle,
}
