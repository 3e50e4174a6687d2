//! Closed enumerations classifying tasks and evidence.
//!
//! All three use the same upper-case representation on the wire and in
//! storage, for example `POLICY`, `IN_PROGRESS` or `DOCUMENT`.

use super::ParseTaskValueError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of compliance work a task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskCategory {
    /// Writing or maintaining a policy.
    Policy,
    /// Defining an operational procedure.
    Procedure,
    /// Implementing a technical safeguard.
    Technical,
    /// Running staff training.
    Training,
    /// Preparing for or responding to an audit.
    Audit,
}

impl TaskCategory {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Policy => "POLICY",
            Self::Procedure => "PROCEDURE",
            Self::Technical => "TECHNICAL",
            Self::Training => "TRAINING",
            Self::Audit => "AUDIT",
        }
    }
}

impl TryFrom<&str> for TaskCategory {
    type Error = ParseTaskValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "POLICY" => Ok(Self::Policy),
            "PROCEDURE" => Ok(Self::Procedure),
            "TECHNICAL" => Ok(Self::Technical),
            "TRAINING" => Ok(Self::Training),
            "AUDIT" => Ok(Self::Audit),
            _ => Err(ParseTaskValueError {
                kind: "task category",
                value: value.to_owned(),
            }),
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress state of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Work has not started. New tasks default to this state.
    #[default]
    Open,
    /// Work is underway.
    InProgress,
    /// Work cannot proceed until something else is resolved.
    Blocked,
    /// Work is complete.
    Done,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Blocked => "BLOCKED",
            Self::Done => "DONE",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "OPEN" => Ok(Self::Open),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "BLOCKED" => Ok(Self::Blocked),
            "DONE" => Ok(Self::Done),
            _ => Err(ParseTaskValueError {
                kind: "task status",
                value: value.to_owned(),
            }),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of artifact an evidence item points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceType {
    /// A written document such as a policy PDF.
    Document,
    /// A captured screenshot.
    Screenshot,
    /// A link to an external system.
    Link,
    /// An exported log excerpt.
    Log,
    /// A signed attestation.
    Attestation,
}

impl EvidenceType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Document => "DOCUMENT",
            Self::Screenshot => "SCREENSHOT",
            Self::Link => "LINK",
            Self::Log => "LOG",
            Self::Attestation => "ATTESTATION",
        }
    }
}

impl TryFrom<&str> for EvidenceType {
    type Error = ParseTaskValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "DOCUMENT" => Ok(Self::Document),
            "SCREENSHOT" => Ok(Self::Screenshot),
            "LINK" => Ok(Self::Link),
            "LOG" => Ok(Self::Log),
            "ATTESTATION" => Ok(Self::Attestation),
            _ => Err(ParseTaskValueError {
                kind: "evidence type",
                value: value.to_owned(),
            }),
        }
    }
}

impl fmt::Display for EvidenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
