//! Error types for task domain validation and parsing.

use super::{StatusId, TaskId};
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The due date precedes the start date.
    #[error("due date {due_date} must not precede start date {start_date}")]
    DueDateBeforeStart {
        /// Start of the scheduled window.
        start_date: NaiveDate,
        /// End of the scheduled window.
        due_date: NaiveDate,
    },

    /// The completion percentage is outside 0–100.
    #[error("completion percentage {0} must be between 0 and 100")]
    CompletionPercentageOutOfRange(u8),

    /// The status name is empty after trimming.
    #[error("status name must not be empty")]
    EmptyStatusName,

    /// The requested transition targets the task's current status.
    #[error("task {task_id} is already in status {status_id}")]
    StatusUnchanged {
        /// The task whose transition was rejected.
        task_id: TaskId,
        /// The status the task already holds.
        status_id: StatusId,
    },
}

/// Error returned while parsing priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
