//! Read-side repository port for the audit log.
//!
//! The write side has no port of its own: entries are persisted by the
//! mutating contexts' adapters inside their unit-of-work, which is what
//! makes an entry durable exactly when the enclosing mutation commits.

use crate::audit::domain::AuditEntry;
use crate::pagination::Page;
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for audit log operations.
pub type AuditLogResult<T> = Result<T, AuditLogError>;

/// Optional filters for audit log listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditLogFilter {
    /// Restricts the listing to entries scoped to this task.
    pub task_id: Option<TaskId>,
    /// Restricts the listing to entries recorded by this user.
    pub user_id: Option<UserId>,
}

impl AuditLogFilter {
    /// Creates an unfiltered listing request.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            task_id: None,
            user_id: None,
        }
    }

    /// Restricts the listing to one task.
    #[must_use]
    pub const fn for_task(mut self, task_id: TaskId) -> Self {
        self.task_id = Some(task_id);
        self
    }

    /// Restricts the listing to one actor.
    #[must_use]
    pub const fn for_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// Audit log query contract.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Lists entries matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AuditLogError::Persistence`] when the listing cannot be
    /// retrieved.
    async fn list(&self, filter: &AuditLogFilter, page: Page) -> AuditLogResult<Vec<AuditEntry>>;
}

/// Errors returned by audit log implementations.
#[derive(Debug, Clone, Error)]
pub enum AuditLogError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuditLogError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
