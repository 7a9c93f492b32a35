//! Repository port for the status catalog.

use crate::audit::domain::AuditEntry;
use crate::task::domain::{Status, StatusId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for status repository operations.
pub type StatusRepositoryResult<T> = Result<T, StatusRepositoryError>;

/// Status catalog persistence contract.
#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// Stores a new status.
    ///
    /// # Errors
    ///
    /// Returns [`StatusRepositoryError::DuplicateName`] when the name is
    /// already taken.
    async fn store(&self, status: &Status, audit: &AuditEntry) -> StatusRepositoryResult<()>;

    /// Lists all statuses, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`StatusRepositoryError::Persistence`] when the listing
    /// cannot be retrieved.
    async fn list(&self) -> StatusRepositoryResult<Vec<Status>>;

    /// Finds a status by identifier.
    ///
    /// Returns `None` when the status does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StatusRepositoryError::Persistence`] when the lookup
    /// fails.
    async fn find_by_id(&self, id: StatusId) -> StatusRepositoryResult<Option<Status>>;

    /// Finds a status by exact name.
    ///
    /// Returns `None` when no status carries the name.
    ///
    /// # Errors
    ///
    /// Returns [`StatusRepositoryError::Persistence`] when the lookup
    /// fails.
    async fn find_by_name(&self, name: &str) -> StatusRepositoryResult<Option<Status>>;

    /// Persists a renamed status.
    ///
    /// # Errors
    ///
    /// Returns [`StatusRepositoryError::NotFound`] when the status does
    /// not exist or [`StatusRepositoryError::DuplicateName`] when the new
    /// name is already taken.
    async fn update(&self, status: &Status, audit: &AuditEntry) -> StatusRepositoryResult<()>;

    /// Deletes a status.
    ///
    /// # Errors
    ///
    /// Returns [`StatusRepositoryError::NotFound`] when the status does
    /// not exist or [`StatusRepositoryError::InUse`] when tasks still
    /// reference it.
    async fn delete(&self, id: StatusId, audit: &AuditEntry) -> StatusRepositoryResult<()>;
}

/// Errors returned by status repository implementations.
#[derive(Debug, Clone, Error)]
pub enum StatusRepositoryError {
    /// The status was not found.
    #[error("status not found: {0}")]
    NotFound(StatusId),

    /// A status with the same name already exists.
    #[error("duplicate status name: {0}")]
    DuplicateName(String),

    /// The status is still referenced by tasks.
    #[error("status still referenced by tasks: {0}")]
    InUse(StatusId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StatusRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<diesel::result::Error> for StatusRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}
