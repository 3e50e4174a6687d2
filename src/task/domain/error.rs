//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// The task name exceeds the storage limit.
    #[error("task name exceeds {max} characters (got {actual})")]
    TaskNameTooLong {
        /// Maximum accepted length in characters.
        max: usize,
        /// Length of the rejected name in characters.
        actual: usize,
    },
}

/// Error returned while parsing a task enumeration from storage or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseTaskValueError {
    /// Name of the enumeration being parsed.
    pub kind: &'static str,
    /// Rejected raw value.
    pub value: String,
}
