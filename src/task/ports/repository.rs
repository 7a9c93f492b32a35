//! Repository port for task persistence, lookup, and status transitions.

use crate::audit::domain::AuditEntry;
use crate::client::domain::ClientId;
use crate::pagination::Page;
use crate::task::domain::{Priority, StatusChange, StatusChangeRequest, StatusId, Task, TaskId};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Optional filters for task listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Restricts the listing to tasks in this status.
    pub status_id: Option<StatusId>,
    /// Restricts the listing to tasks for this client.
    pub client_id: Option<ClientId>,
    /// Restricts the listing to tasks assigned to this user.
    pub assigned_to: Option<UserId>,
    /// Restricts the listing to tasks with this priority.
    pub priority: Option<Priority>,
}

impl TaskFilter {
    /// Creates an unfiltered listing request.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status_id: None,
            client_id: None,
            assigned_to: None,
            priority: None,
        }
    }

    /// Restricts the listing to one status.
    #[must_use]
    pub const fn with_status(mut self, status_id: StatusId) -> Self {
        self.status_id = Some(status_id);
        self
    }

    /// Restricts the listing to one client.
    #[must_use]
    pub const fn with_client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Restricts the listing to one assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assigned_to: UserId) -> Self {
        self.assigned_to = Some(assigned_to);
        self
    }

    /// Restricts the listing to one priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Task persistence contract.
///
/// Mutating methods take the audit entry recording the change and must
/// persist it in the same unit-of-work as the mutation, so neither
/// survives without the other.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the write fails.
    async fn store(&self, task: &Task, audit: &AuditEntry) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task (details, assignment,
    /// progress).
    ///
    /// Status changes do not go through this method; they use
    /// [`change_status`](Self::change_status), which owns the lock.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task, audit: &AuditEntry) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the lookup
    /// fails.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Lists tasks matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the listing
    /// cannot be retrieved.
    async fn list(&self, filter: &TaskFilter, page: Page) -> TaskRepositoryResult<Vec<Task>>;

    /// Deletes a task and its history records.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId, audit: &AuditEntry) -> TaskRepositoryResult<()>;

    /// Performs a status transition under an exclusive lock on the task.
    ///
    /// The implementation holds the lock for the whole unit-of-work:
    /// re-reads the current status after acquiring it, validates the
    /// transition, applies the task mutation, and appends one history
    /// record and one audit entry. Everything commits or rolls back
    /// together, and concurrent transitions on the same task serialize
    /// behind the lock. Transitions on different tasks are independent.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] for a missing task,
    /// [`TaskRepositoryError::StatusNotFound`] for a missing target
    /// status, or [`TaskRepositoryError::StatusUnchanged`] for a no-op
    /// transition — all with zero writes.
    async fn change_status(
        &self,
        request: StatusChangeRequest,
    ) -> TaskRepositoryResult<StatusChange>;

    /// Returns the task's transition history, oldest first.
    ///
    /// Pure read: takes no lock and returns an empty sequence for a task
    /// with no transitions yet — including an unknown task id.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the listing
    /// cannot be retrieved.
    async fn history_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<StatusChange>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The target status was not found.
    #[error("status not found: {0}")]
    StatusNotFound(StatusId),

    /// The requested transition targets the task's current status.
    #[error("task {task_id} is already in status {status_id}")]
    StatusUnchanged {
        /// The task whose transition was rejected.
        task_id: TaskId,
        /// The status the task already holds.
        status_id: StatusId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<diesel::result::Error> for TaskRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}
