//! Service layer for status transitions and the per-task history.
//!
//! This is the one workflow in the crate with real invariants. The
//! repository performs the transition under an exclusive lock on the task
//! row, holding it for the whole unit-of-work: the current status is
//! re-read after the lock is acquired, the mutation, the history record,
//! and the audit entry commit together, and a failure at any step rolls
//! everything back. The service's job is input shaping and translating
//! the port's outcome into the client-facing error taxonomy.

use crate::task::domain::{StatusChange, StatusChangeRequest, StatusId, TaskId};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for status transitions.
///
/// All variants except [`Repository`](Self::Repository) are caller
/// errors: the unit-of-work is discarded and no partial writes occur.
#[derive(Debug, Error)]
pub enum TaskWorkflowError {
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The target status does not exist.
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

    /// Repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
}

impl From<TaskRepositoryError> for TaskWorkflowError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::TaskNotFound(id),
            TaskRepositoryError::StatusNotFound(id) => Self::StatusNotFound(id),
            TaskRepositoryError::StatusUnchanged { task_id, status_id } => {
                Self::StatusUnchanged { task_id, status_id }
            }
            other => Self::Repository(other),
        }
    }
}

/// Result type for task workflow service operations.
pub type TaskWorkflowResult<T> = Result<T, TaskWorkflowError>;

/// Status transition orchestration service.
#[derive(Clone)]
pub struct TaskWorkflowService<R>
where
    R: TaskRepository,
{
    repository: Arc<R>,
}

impl<R> TaskWorkflowService<R>
where
    R: TaskRepository,
{
    /// Creates a new task workflow service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Moves a task into a different status.
    ///
    /// Exactly one task update, one history record, and one audit entry
    /// persist per successful call; a failed call persists nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::TaskNotFound`],
    /// [`TaskWorkflowError::StatusNotFound`], or
    /// [`TaskWorkflowError::StatusUnchanged`] for caller errors, or
    /// [`TaskWorkflowError::Repository`] when the store fails.
    pub async fn change_status(
        &self,
        request: StatusChangeRequest,
    ) -> TaskWorkflowResult<StatusChange> {
        let task_id = request.task_id;
        let change = self.repository.change_status(request).await?;
        tracing::info!(
            %task_id,
            from = %change.from_status_id,
            to = %change.to_status_id,
            "task status changed",
        );
        Ok(change)
    }

    /// Returns a task's transition history, oldest first.
    ///
    /// Returns an empty sequence for a task with no transitions yet —
    /// including an unknown task id, which is deliberately not treated as
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when the listing cannot
    /// be retrieved.
    pub async fn history(&self, task_id: TaskId) -> TaskWorkflowResult<Vec<StatusChange>> {
        Ok(self.repository.history_for(task_id).await?)
    }
}
