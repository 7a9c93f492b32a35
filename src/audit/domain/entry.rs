//! Audit entry record type.

use super::{AuditAction, AuditEntryId};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// One append-only record of a user-attributable mutation.
///
/// Entries are constructed by the mutating services (or, for the status
/// transition, by the adapter holding the row lock) and persisted inside
/// the same unit-of-work as the mutation they describe.
///
/// # Examples
///
/// ```
/// use mockable::DefaultClock;
/// use taskledger::audit::domain::{AuditAction, AuditEntry};
/// use taskledger::user::domain::UserId;
///
/// let entry = AuditEntry::new(
///     UserId::new(),
///     AuditAction::ClientCreated,
///     "client_id=…, name=Acme",
///     &DefaultClock,
/// );
/// assert_eq!(entry.action, AuditAction::ClientCreated);
/// assert!(entry.task_id.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique identifier for this entry.
    pub id: AuditEntryId,

    /// The user who performed the action.
    pub user_id: UserId,

    /// The task the action concerned, when task-scoped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,

    /// The action tag.
    pub action: AuditAction,

    /// Free-text detail describing the mutation.
    pub detail: String,

    /// When the entry was recorded.
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    /// Creates an entry stamped with the current clock time.
    #[must_use]
    pub fn new(
        user_id: UserId,
        action: AuditAction,
        detail: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self::stamped(user_id, action, detail, clock.utc())
    }

    /// Creates an entry with an explicit timestamp.
    ///
    /// Used when the entry must share an instant with the mutation it
    /// records, e.g. a status change performed under a row lock.
    #[must_use]
    pub fn stamped(
        user_id: UserId,
        action: AuditAction,
        detail: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AuditEntryId::new(),
            user_id,
            task_id: None,
            action,
            detail: detail.into(),
            created_at,
        }
    }

    /// Scopes the entry to a task.
    #[must_use]
    pub const fn with_task(mut self, task_id: TaskId) -> Self {
        self.task_id = Some(task_id);
        self
    }
}
