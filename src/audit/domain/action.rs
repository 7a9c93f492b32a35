//! Closed set of auditable action tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Action tag recorded with every audit entry.
///
/// The storage representation is the upper-case tag the original audit
/// table was seeded with, e.g. `TASK_STATUS_CHANGED`.
///
/// # Examples
///
/// ```
/// use taskledger::audit::domain::AuditAction;
///
/// assert_eq!(AuditAction::TaskStatusChanged.as_str(), "TASK_STATUS_CHANGED");
/// assert_eq!(
///     AuditAction::try_from("CLIENT_CREATED"),
///     Ok(AuditAction::ClientCreated),
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// A task was created.
    TaskCreated,
    /// A task's descriptive fields were updated.
    TaskUpdated,
    /// A task was assigned or unassigned.
    TaskAssigned,
    /// A task's completion percentage changed.
    TaskProgressUpdated,
    /// A task moved to a different status.
    TaskStatusChanged,
    /// A task was deleted.
    TaskDeleted,
    /// A client record was created.
    ClientCreated,
    /// A client record was updated.
    ClientUpdated,
    /// A client record was deleted.
    ClientDeleted,
    /// A status was added to the catalog.
    StatusCreated,
    /// A status was renamed.
    StatusUpdated,
    /// A status was removed from the catalog.
    StatusDeleted,
    /// A user's role changed.
    UserRoleChanged,
    /// A user was activated or deactivated.
    UserActiveChanged,
}

impl AuditAction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskCreated => "TASK_CREATED",
            Self::TaskUpdated => "TASK_UPDATED",
            Self::TaskAssigned => "TASK_ASSIGNED",
            Self::TaskProgressUpdated => "TASK_PROGRESS_UPDATED",
            Self::TaskStatusChanged => "TASK_STATUS_CHANGED",
            Self::TaskDeleted => "TASK_DELETED",
            Self::ClientCreated => "CLIENT_CREATED",
            Self::ClientUpdated => "CLIENT_UPDATED",
            Self::ClientDeleted => "CLIENT_DELETED",
            Self::StatusCreated => "STATUS_CREATED",
            Self::StatusUpdated => "STATUS_UPDATED",
            Self::StatusDeleted => "STATUS_DELETED",
            Self::UserRoleChanged => "USER_ROLE_CHANGED",
            Self::UserActiveChanged => "USER_ACTIVE_CHANGED",
        }
    }
}

impl TryFrom<&str> for AuditAction {
    type Error = ParseAuditActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "TASK_CREATED" => Ok(Self::TaskCreated),
            "TASK_UPDATED" => Ok(Self::TaskUpdated),
            "TASK_ASSIGNED" => Ok(Self::TaskAssigned),
            "TASK_PROGRESS_UPDATED" => Ok(Self::TaskProgressUpdated),
            "TASK_STATUS_CHANGED" => Ok(Self::TaskStatusChanged),
            "TASK_DELETED" => Ok(Self::TaskDeleted),
            "CLIENT_CREATED" => Ok(Self::ClientCreated),
            "CLIENT_UPDATED" => Ok(Self::ClientUpdated),
            "CLIENT_DELETED" => Ok(Self::ClientDeleted),
            "STATUS_CREATED" => Ok(Self::StatusCreated),
            "STATUS_UPDATED" => Ok(Self::StatusUpdated),
            "STATUS_DELETED" => Ok(Self::StatusDeleted),
            "USER_ROLE_CHANGED" => Ok(Self::UserRoleChanged),
            "USER_ACTIVE_CHANGED" => Ok(Self::UserActiveChanged),
            _ => Err(ParseAuditActionError(value.to_owned())),
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned while parsing action tags from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown audit action: {0}")]
pub struct ParseAuditActionError(pub String);
