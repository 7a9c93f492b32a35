//! Domain-focused tests for audit entries and action tags.

use crate::audit::domain::{AuditAction, AuditEntry, ParseAuditActionError};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use mockable::DefaultClock;
use rstest::rstest;

const ALL_ACTIONS: [AuditAction; 14] = [
    AuditAction::TaskCreated,
    AuditAction::TaskUpdated,
    AuditAction::TaskAssigned,
    AuditAction::TaskProgressUpdated,
    AuditAction::TaskStatusChanged,
    AuditAction::TaskDeleted,
    AuditAction::ClientCreated,
    AuditAction::ClientUpdated,
    AuditAction::ClientDeleted,
    AuditAction::StatusCreated,
    AuditAction::StatusUpdated,
    AuditAction::StatusDeleted,
    AuditAction::UserRoleChanged,
    AuditAction::UserActiveChanged,
];

#[rstest]
fn action_tags_round_trip_through_storage_form() {
    for action in ALL_ACTIONS {
        assert_eq!(AuditAction::try_from(action.as_str()), Ok(action));
    }
}

#[rstest]
fn action_parse_rejects_unknown_tag() {
    assert_eq!(
        AuditAction::try_from("TASK_EXPLODED"),
        Err(ParseAuditActionError("TASK_EXPLODED".to_owned())),
    );
}

#[rstest]
fn entry_defaults_to_no_task_scope() {
    let entry = AuditEntry::new(
        UserId::new(),
        AuditAction::UserActiveChanged,
        "user_id=…, is_active=false",
        &DefaultClock,
    );
    assert!(entry.task_id.is_none());
}

#[rstest]
fn entry_with_task_carries_scope() {
    let task_id = TaskId::new();
    let entry = AuditEntry::new(
        UserId::new(),
        AuditAction::TaskUpdated,
        "fields updated",
        &DefaultClock,
    )
    .with_task(task_id);
    assert_eq!(entry.task_id, Some(task_id));
}
