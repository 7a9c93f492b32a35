//! Diesel row models for task workflow persistence.

use super::schema::{statuses, task_status_history, tasks};
use crate::client::domain::ClientId;
use crate::task::domain::{
    CompletionPercentage, PersistedTaskData, Priority, Status, StatusChange, StatusChangeId,
    StatusId, Task, TaskId,
};
use crate::task::ports::TaskRepositoryError;
use crate::user::domain::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Client reference.
    pub client_id: uuid::Uuid,
    /// Optional assignee.
    pub assigned_to: Option<uuid::Uuid>,
    /// Optional creator reference.
    pub created_by: Option<uuid::Uuid>,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Priority label.
    pub priority: String,
    /// Optional scheduled start.
    pub start_date: Option<NaiveDate>,
    /// Optional scheduled deadline.
    pub due_date: Option<NaiveDate>,
    /// Status reference.
    pub status_id: uuid::Uuid,
    /// Completion percentage.
    pub completion_percentage: i16,
    /// Optional completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Client reference.
    pub client_id: uuid::Uuid,
    /// Optional assignee.
    pub assigned_to: Option<uuid::Uuid>,
    /// Optional creator reference.
    pub created_by: Option<uuid::Uuid>,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Priority label.
    pub priority: String,
    /// Optional scheduled start.
    pub start_date: Option<NaiveDate>,
    /// Optional scheduled deadline.
    pub due_date: Option<NaiveDate>,
    /// Status reference.
    pub status_id: uuid::Uuid,
    /// Completion percentage.
    pub completion_percentage: i16,
    /// Optional completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl NewTaskRow {
    /// Builds an insert row from a domain task.
    #[must_use]
    pub fn from_domain(task: &Task) -> Self {
        Self {
            id: task.id().into_inner(),
            client_id: task.client_id().into_inner(),
            assigned_to: task.assigned_to().map(UserId::into_inner),
            created_by: task.created_by().map(UserId::into_inner),
            title: task.title().to_owned(),
            description: task.description().map(str::to_owned),
            priority: task.priority().as_str().to_owned(),
            start_date: task.start_date(),
            due_date: task.due_date(),
            status_id: task.status_id().into_inner(),
            completion_percentage: i16::from(task.completion_percentage().value()),
            completed_at: task.completed_at(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// Query result row for status records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = statuses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StatusRow {
    /// Status identifier.
    pub id: uuid::Uuid,
    /// Status name.
    pub name: String,
}

/// Insert model for status records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = statuses)]
pub struct NewStatusRow {
    /// Status identifier.
    pub id: uuid::Uuid,
    /// Status name.
    pub name: String,
}

impl NewStatusRow {
    /// Builds an insert row from a domain status.
    #[must_use]
    pub fn from_domain(status: &Status) -> Self {
        Self {
            id: status.id().into_inner(),
            name: status.name().to_owned(),
        }
    }
}

/// Query result row for history records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_status_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StatusChangeRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Task reference.
    pub task_id: uuid::Uuid,
    /// Actor reference.
    pub changed_by: uuid::Uuid,
    /// Status before the transition.
    pub from_status_id: uuid::Uuid,
    /// Status after the transition.
    pub to_status_id: uuid::Uuid,
    /// Optional note.
    pub note: Option<String>,
    /// Transition timestamp.
    pub changed_at: DateTime<Utc>,
}

/// Insert model for history records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_status_history)]
pub struct NewStatusChangeRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Task reference.
    pub task_id: uuid::Uuid,
    /// Actor reference.
    pub changed_by: uuid::Uuid,
    /// Status before the transition.
    pub from_status_id: uuid::Uuid,
    /// Status after the transition.
    pub to_status_id: uuid::Uuid,
    /// Optional note.
    pub note: Option<String>,
    /// Transition timestamp.
    pub changed_at: DateTime<Utc>,
}

impl NewStatusChangeRow {
    /// Builds an insert row from a domain history record.
    #[must_use]
    pub fn from_domain(change: &StatusChange) -> Self {
        Self {
            id: change.id.into_inner(),
            task_id: change.task_id.into_inner(),
            changed_by: change.changed_by.into_inner(),
            from_status_id: change.from_status_id.into_inner(),
            to_status_id: change.to_status_id.into_inner(),
            note: change.note.clone(),
            changed_at: change.changed_at,
        }
    }
}

/// Maps a stored row back to the domain task.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when the stored priority
/// or percentage fails domain validation.
pub fn row_to_task(row: TaskRow) -> Result<Task, TaskRepositoryError> {
    let priority =
        Priority::try_from(row.priority.as_str()).map_err(TaskRepositoryError::persistence)?;
    let percentage = u8::try_from(row.completion_percentage)
        .map_err(TaskRepositoryError::persistence)
        .and_then(|value| {
            CompletionPercentage::new(value).map_err(TaskRepositoryError::persistence)
        })?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        client_id: ClientId::from_uuid(row.client_id),
        assigned_to: row.assigned_to.map(UserId::from_uuid),
        created_by: row.created_by.map(UserId::from_uuid),
        title: row.title,
        description: row.description,
        priority,
        start_date: row.start_date,
        due_date: row.due_date,
        status_id: StatusId::from_uuid(row.status_id),
        completion_percentage: percentage,
        completed_at: row.completed_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

/// Maps a stored row back to the domain status.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when the stored name
/// fails domain validation.
pub fn row_to_status(row: StatusRow) -> Result<Status, TaskRepositoryError> {
    Status::from_parts(StatusId::from_uuid(row.id), row.name)
        .map_err(TaskRepositoryError::persistence)
}

/// Maps a stored row back to the domain history record.
#[must_use]
pub fn row_to_change(row: StatusChangeRow) -> StatusChange {
    StatusChange {
        id: StatusChangeId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        changed_by: UserId::from_uuid(row.changed_by),
        from_status_id: StatusId::from_uuid(row.from_status_id),
        to_status_id: StatusId::from_uuid(row.to_status_id),
        note: row.note,
        changed_at: row.changed_at,
    }
}
