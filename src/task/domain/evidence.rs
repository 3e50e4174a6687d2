//! Evidence items attached to tasks.

use super::{EvidenceId, EvidenceType, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Parameter object for creating an evidence item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvidence {
    /// Owning task.
    pub task_id: TaskId,
    /// Kind of artifact.
    pub evidence_type: EvidenceType,
    /// Optional free-form note.
    pub note: Option<String>,
}

/// Proof attached to a task. Evidence is never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    id: EvidenceId,
    task_id: TaskId,
    evidence_type: EvidenceType,
    note: Option<String>,
    created_at: DateTime<Utc>,
}

impl Evidence {
    /// Creates a new evidence item with a server-assigned identifier.
    #[must_use]
    pub fn new(data: NewEvidence, clock: &impl Clock) -> Self {
        Self {
            id: EvidenceId::new(),
            task_id: data.task_id,
            evidence_type: data.evidence_type,
            note: data.note,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs an evidence item from persisted storage.
    #[must_use]
    pub fn from_persisted(
        id: EvidenceId,
        data: NewEvidence,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            task_id: data.task_id,
            evidence_type: data.evidence_type,
            note: data.note,
            created_at,
        }
    }

    /// Returns the evidence identifier.
    #[must_use]
    pub const fn id(&self) -> EvidenceId {
        self.id
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the evidence type.
    #[must_use]
    pub const fn evidence_type(&self) -> EvidenceType {
        self.evidence_type
    }

    /// Returns the note, if any.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
