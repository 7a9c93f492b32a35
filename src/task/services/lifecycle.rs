//! Service layer for task creation, lookup, updates, assignment, and
//! progress.

use crate::audit::domain::{AuditAction, AuditEntry};
use crate::client::domain::ClientId;
use crate::pagination::Page;
use crate::task::domain::{
    CompletionPercentage, NewTaskData, Priority, StatusId, Task, TaskDomainError, TaskId,
};
use crate::task::ports::{TaskFilter, TaskRepository, TaskRepositoryError};
use crate::user::domain::UserId;
use crate::user::ports::{UserRepository, UserRepositoryError};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    client_id: ClientId,
    status_id: StatusId,
    title: String,
    description: Option<String>,
    priority: Priority,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    assigned_to: Option<UserId>,
    created_by: Option<UserId>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(client_id: ClientId, status_id: StatusId, title: impl Into<String>) -> Self {
        Self {
            client_id,
            status_id,
            title: title.into(),
            description: None,
            priority: Priority::default(),
            start_date: None,
            due_date: None,
            assigned_to: None,
            created_by: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the scheduled start.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets the scheduled deadline.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the initial assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assigned_to: UserId) -> Self {
        self.assigned_to = Some(assigned_to);
        self
    }

    /// Records the creating user.
    #[must_use]
    pub const fn with_created_by(mut self, created_by: UserId) -> Self {
        self.created_by = Some(created_by);
        self
    }
}

/// Conditional field updates for a task.
///
/// Only fields set to `Some` are applied; the rest keep their stored
/// values. Dates are validated over the merged old/new window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    title: Option<String>,
    description: Option<String>,
    priority: Option<Priority>,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
}

impl TaskUpdate {
    /// Creates an empty update.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            title: None,
            description: None,
            priority: None,
            start_date: None,
            due_date: None,
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the scheduled start.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Replaces the scheduled deadline.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The requested assignee does not exist.
    #[error("assigned user not found: {0}")]
    AssigneeNotFound(UserId),

    /// The requested assignee is deactivated.
    #[error("assigned user is inactive: {0}")]
    AssigneeInactive(UserId),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Task repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),

    /// User lookup failed.
    #[error(transparent)]
    UserDirectory(#[from] UserRepositoryError),
}

impl From<TaskRepositoryError> for TaskLifecycleError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::TaskNotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, U, C>
where
    R: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<R, U, C> TaskLifecycleService<R, U, C>
where
    R: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            repository,
            users,
            clock,
        }
    }

    /// Ensures an assignee exists and is active.
    async fn check_assignee(&self, assigned_to: UserId) -> TaskLifecycleResult<()> {
        let user = self
            .users
            .find_by_id(assigned_to)
            .await?
            .ok_or(TaskLifecycleError::AssigneeNotFound(assigned_to))?;
        if !user.is_active() {
            return Err(TaskLifecycleError::AssigneeInactive(assigned_to));
        }
        Ok(())
    }

    /// Creates a new task.
    ///
    /// When an assignee is given the user must exist and be active.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when validation fails or the
    /// repository rejects persistence.
    pub async fn create_task(
        &self,
        request: CreateTaskRequest,
        actor: UserId,
    ) -> TaskLifecycleResult<Task> {
        if let Some(assigned_to) = request.assigned_to {
            self.check_assignee(assigned_to).await?;
        }

        let task = Task::new(
            NewTaskData {
                client_id: request.client_id,
                status_id: request.status_id,
                title: request.title,
                description: request.description,
                priority: request.priority,
                start_date: request.start_date,
                due_date: request.due_date,
                assigned_to: request.assigned_to,
                created_by: request.created_by,
            },
            &*self.clock,
        )?;

        let entry = AuditEntry::new(
            actor,
            AuditAction::TaskCreated,
            format!("title={}", task.title()),
            &*self.clock,
        )
        .with_task(task.id());
        self.repository.store(&task, &entry).await?;
        tracing::debug!(task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task does
    /// not exist.
    pub async fn get_task(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(id))
    }

    /// Lists tasks matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing cannot be retrieved.
    pub async fn list_tasks(
        &self,
        filter: &TaskFilter,
        page: Page,
    ) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list(filter, page).await?)
    }

    /// Applies conditional field updates to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task does
    /// not exist, or a validation/repository error.
    pub async fn update_task(
        &self,
        id: TaskId,
        update: TaskUpdate,
        actor: UserId,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.get_task(id).await?;

        // The schedule is validated over the merged old/new window before
        // any field is written.
        let merged_start = update.start_date.or(task.start_date());
        let merged_due = update.due_date.or(task.due_date());
        task.reschedule(merged_start, merged_due, &*self.clock)?;

        if let Some(title) = update.title {
            task.set_title(title, &*self.clock)?;
        }
        if let Some(description) = update.description {
            task.set_description(description, &*self.clock);
        }
        if let Some(priority) = update.priority {
            task.set_priority(priority, &*self.clock);
        }

        let entry = AuditEntry::new(actor, AuditAction::TaskUpdated, "fields updated", &*self.clock)
            .with_task(id);
        self.repository.update(&task, &entry).await?;
        Ok(task)
    }

    /// Assigns the task to a user, or unassigns it with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::AssigneeNotFound`] or
    /// [`TaskLifecycleError::AssigneeInactive`] for an unusable assignee,
    /// [`TaskLifecycleError::TaskNotFound`] for a missing task, or a
    /// repository error.
    pub async fn assign_task(
        &self,
        id: TaskId,
        assigned_to: Option<UserId>,
        actor: UserId,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.get_task(id).await?;
        if let Some(assignee) = assigned_to {
            self.check_assignee(assignee).await?;
        }

        task.assign(assigned_to, &*self.clock);
        let detail = assigned_to.map_or_else(
            || "assigned_to=none".to_owned(),
            |assignee| format!("assigned_to={assignee}"),
        );
        let entry =
            AuditEntry::new(actor, AuditAction::TaskAssigned, detail, &*self.clock).with_task(id);
        self.repository.update(&task, &entry).await?;
        Ok(task)
    }

    /// Records manual progress on a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::CompletionPercentageOutOfRange`]
    /// (wrapped) for an invalid percentage,
    /// [`TaskLifecycleError::TaskNotFound`] for a missing task, or a
    /// repository error.
    pub async fn update_progress(
        &self,
        id: TaskId,
        completion_percentage: u8,
        actor: UserId,
    ) -> TaskLifecycleResult<Task> {
        let progress = CompletionPercentage::new(completion_percentage)
            .map_err(TaskLifecycleError::Domain)?;
        let mut task = self.get_task(id).await?;

        task.set_progress(progress, &*self.clock);
        let entry = AuditEntry::new(
            actor,
            AuditAction::TaskProgressUpdated,
            format!("progress={progress}"),
            &*self.clock,
        )
        .with_task(id);
        self.repository.update(&task, &entry).await?;
        Ok(task)
    }

    /// Deletes a task and its history records.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task does
    /// not exist.
    pub async fn delete_task(&self, id: TaskId, actor: UserId) -> TaskLifecycleResult<()> {
        let entry = AuditEntry::new(actor, AuditAction::TaskDeleted, "deleted task", &*self.clock)
            .with_task(id);
        self.repository.delete(id, &entry).await?;
        tracing::debug!(task_id = %id, "task deleted");
        Ok(())
    }
}
