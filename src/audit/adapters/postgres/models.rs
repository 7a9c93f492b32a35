//! Diesel row models for audit trail persistence.

use super::schema::audit_log;
use crate::audit::domain::{AuditAction, AuditEntry, AuditEntryId};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for audit entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = audit_log)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AuditEntryRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Actor identifier.
    pub user_id: uuid::Uuid,
    /// Optional task scope.
    pub task_id: Option<uuid::Uuid>,
    /// Action tag.
    pub action: String,
    /// Free-text detail.
    pub detail: String,
    /// Record timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for audit entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = audit_log)]
pub struct NewAuditEntryRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Actor identifier.
    pub user_id: uuid::Uuid,
    /// Optional task scope.
    pub task_id: Option<uuid::Uuid>,
    /// Action tag.
    pub action: String,
    /// Free-text detail.
    pub detail: String,
    /// Record timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewAuditEntryRow {
    /// Builds an insert row from a domain entry.
    #[must_use]
    pub fn from_domain(entry: &AuditEntry) -> Self {
        Self {
            id: entry.id.into_inner(),
            user_id: entry.user_id.into_inner(),
            task_id: entry.task_id.map(TaskId::into_inner),
            action: entry.action.as_str().to_owned(),
            detail: entry.detail.clone(),
            created_at: entry.created_at,
        }
    }
}

/// Maps a stored row back to the domain entry.
///
/// # Errors
///
/// Returns the parse error when the stored action tag is unknown.
pub fn row_to_entry(row: AuditEntryRow) -> Result<AuditEntry, crate::audit::domain::ParseAuditActionError> {
    let action = AuditAction::try_from(row.action.as_str())?;
    Ok(AuditEntry {
        id: AuditEntryId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        task_id: row.task_id.map(TaskId::from_uuid),
        action,
        detail: row.detail,
        created_at: row.created_at,
    })
}
