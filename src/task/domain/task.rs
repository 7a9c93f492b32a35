//! Task aggregate root.

use super::{
    CompletionPercentage, Priority, Status, StatusChange, StatusChangeId, StatusId,
    TaskDomainError, TaskId, TerminalStatus,
};
use crate::client::domain::ClientId;
use crate::user::domain::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// Tasks hold the invariant that `completed_at` is set exactly while the
/// task sits in the configured terminal status; the status transition and
/// the progress setter are the only mutations touching it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    client_id: ClientId,
    assigned_to: Option<UserId>,
    created_by: Option<UserId>,
    title: String,
    description: Option<String>,
    priority: Priority,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    status_id: StatusId,
    completion_percentage: CompletionPercentage,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// The client the task is performed for.
    pub client_id: ClientId,
    /// The initial status reference.
    pub status_id: StatusId,
    /// Task title.
    pub title: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Scheduling priority.
    pub priority: Priority,
    /// Optional scheduled start.
    pub start_date: Option<NaiveDate>,
    /// Optional scheduled deadline.
    pub due_date: Option<NaiveDate>,
    /// Optional initial assignee.
    pub assigned_to: Option<UserId>,
    /// Optional creator reference.
    pub created_by: Option<UserId>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted client reference.
    pub client_id: ClientId,
    /// Persisted assignee, if any.
    pub assigned_to: Option<UserId>,
    /// Persisted creator, if any.
    pub created_by: Option<UserId>,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted scheduled start, if any.
    pub start_date: Option<NaiveDate>,
    /// Persisted scheduled deadline, if any.
    pub due_date: Option<NaiveDate>,
    /// Persisted status reference.
    pub status_id: StatusId,
    /// Persisted completion percentage.
    pub completion_percentage: CompletionPercentage,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task with zero progress.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank title or
    /// [`TaskDomainError::DueDateBeforeStart`] for an inverted schedule.
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        validate_schedule(data.start_date, data.due_date)?;
        let timestamp = clock.utc();

        Ok(Self {
            id: TaskId::new(),
            client_id: data.client_id,
            assigned_to: data.assigned_to,
            created_by: data.created_by,
            title: validated_title(data.title)?,
            description: data.description,
            priority: data.priority,
            start_date: data.start_date,
            due_date: data.due_date,
            status_id: data.status_id,
            completion_percentage: CompletionPercentage::ZERO,
            completed_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            client_id: data.client_id,
            assigned_to: data.assigned_to,
            created_by: data.created_by,
            title: data.title,
            description: data.description,
            priority: data.priority,
            start_date: data.start_date,
            due_date: data.due_date,
            status_id: data.status_id,
            completion_percentage: data.completion_percentage,
            completed_at: data.completed_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the client reference.
    #[must_use]
    pub const fn client_id(&self) -> ClientId {
        self.client_id
    }

    /// Returns the current assignee, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }

    /// Returns the creator reference, if any.
    #[must_use]
    pub const fn created_by(&self) -> Option<UserId> {
        self.created_by
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the scheduling priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the scheduled start, if any.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the scheduled deadline, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the current status reference.
    #[must_use]
    pub const fn status_id(&self) -> StatusId {
        self.status_id
    }

    /// Returns the completion percentage.
    #[must_use]
    pub const fn completion_percentage(&self) -> CompletionPercentage {
        self.completion_percentage
    }

    /// Returns the completion timestamp, if any.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the task title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is empty
    /// after trimming.
    pub fn set_title(
        &mut self,
        title: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.title = validated_title(title)?;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>, clock: &impl Clock) {
        self.description = Some(description.into());
        self.touch(clock);
    }

    /// Replaces the scheduling priority.
    pub fn set_priority(&mut self, priority: Priority, clock: &impl Clock) {
        self.priority = priority;
        self.touch(clock);
    }

    /// Replaces the scheduled window with the merged final values.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DueDateBeforeStart`] when both dates
    /// are set and inverted.
    pub fn reschedule(
        &mut self,
        start_date: Option<NaiveDate>,
        due_date: Option<NaiveDate>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        validate_schedule(start_date, due_date)?;
        self.start_date = start_date;
        self.due_date = due_date;
        self.touch(clock);
        Ok(())
    }

    /// Assigns the task to a user, or unassigns it.
    pub fn assign(&mut self, assignee: Option<UserId>, clock: &impl Clock) {
        self.assigned_to = assignee;
        self.touch(clock);
    }

    /// Records manual progress.
    ///
    /// Reaching 100 percent stamps `completed_at` only when it is not
    /// already set; dropping below 100 clears it.
    pub fn set_progress(&mut self, progress: CompletionPercentage, clock: &impl Clock) {
        self.completion_percentage = progress;
        if progress.is_complete() {
            if self.completed_at.is_none() {
                self.completed_at = Some(clock.utc());
            }
        } else {
            self.completed_at = None;
        }
        self.touch(clock);
    }

    /// Moves the task into a different status.
    ///
    /// Entering the terminal status forces the percentage to 100 and
    /// stamps `completed_at` with the current instant, overwriting any
    /// earlier stamp; entering any other status clears `completed_at` and
    /// leaves the percentage untouched. Returns the history record for
    /// the transition; the caller persists it together with the task in
    /// one unit-of-work.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::StatusUnchanged`] when the target
    /// equals the current status.
    pub fn change_status(
        &mut self,
        to_status: &Status,
        changed_by: UserId,
        note: Option<String>,
        terminal: &TerminalStatus,
        clock: &(impl Clock + ?Sized),
    ) -> Result<StatusChange, TaskDomainError> {
        if self.status_id == to_status.id() {
            return Err(TaskDomainError::StatusUnchanged {
                task_id: self.id,
                status_id: self.status_id,
            });
        }

        let from_status_id = self.status_id;
        let changed_at = clock.utc();
        self.status_id = to_status.id();

        if terminal.matches(to_status) {
            self.completion_percentage = CompletionPercentage::COMPLETE;
            self.completed_at = Some(changed_at);
        } else {
            self.completed_at = None;
        }
        self.updated_at = changed_at;

        Ok(StatusChange {
            id: StatusChangeId::new(),
            task_id: self.id,
            changed_by,
            from_status_id,
            to_status_id: to_status.id(),
            note,
            changed_at,
        })
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn validated_title(title: impl Into<String>) -> Result<String, TaskDomainError> {
    let raw = title.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}

/// Rejects a schedule whose deadline precedes its start.
fn validate_schedule(
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
) -> Result<(), TaskDomainError> {
    if let (Some(start), Some(due)) = (start_date, due_date) {
        if due < start {
            return Err(TaskDomainError::DueDateBeforeStart {
                start_date: start,
                due_date: due,
            });
        }
    }
    Ok(())
}
