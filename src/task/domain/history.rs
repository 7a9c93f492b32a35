//! Status transition records and the transition request payload.

use super::{StatusChangeId, StatusId, TaskId};
use crate::audit::domain::{AuditAction, AuditEntry};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One append-only record of a task moving between statuses.
///
/// History records are created exclusively by the status transition and
/// are never mutated or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    /// Record identifier.
    pub id: StatusChangeId,

    /// The task that moved.
    pub task_id: TaskId,

    /// The user who requested the transition.
    pub changed_by: UserId,

    /// The status the task held before the transition.
    pub from_status_id: StatusId,

    /// The status the task holds after the transition.
    pub to_status_id: StatusId,

    /// Optional free-text note supplied with the transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// When the transition was applied.
    pub changed_at: DateTime<Utc>,
}

impl StatusChange {
    /// Formats the audit detail for this transition.
    ///
    /// Encodes `from -> to` and the note, with `-` standing in for an
    /// absent note.
    #[must_use]
    pub fn audit_detail(&self) -> String {
        format!(
            "{}->{}, note={}",
            self.from_status_id,
            self.to_status_id,
            self.note.as_deref().unwrap_or("-"),
        )
    }

    /// Builds the audit entry recording this transition.
    ///
    /// The entry shares the transition's timestamp so both records carry
    /// the same instant within the unit-of-work.
    #[must_use]
    pub fn audit_entry(&self) -> AuditEntry {
        AuditEntry::stamped(
            self.changed_by,
            AuditAction::TaskStatusChanged,
            self.audit_detail(),
            self.changed_at,
        )
        .with_task(self.task_id)
    }
}

/// Request payload for a status transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChangeRequest {
    /// The task to transition.
    pub task_id: TaskId,

    /// The status to move the task into.
    pub to_status_id: StatusId,

    /// The user requesting the transition.
    pub changed_by: UserId,

    /// Optional free-text note persisted with the history record.
    pub note: Option<String>,
}

impl StatusChangeRequest {
    /// Creates a transition request without a note.
    #[must_use]
    pub const fn new(task_id: TaskId, to_status_id: StatusId, changed_by: UserId) -> Self {
        Self {
            task_id,
            to_status_id,
            changed_by,
            note: None,
        }
    }

    /// Attaches a note to the transition.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
