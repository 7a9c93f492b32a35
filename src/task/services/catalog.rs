//! Service layer for the status catalog.

use crate::audit::domain::{AuditAction, AuditEntry};
use crate::task::domain::{Status, StatusId, TaskDomainError};
use crate::task::ports::{StatusRepository, StatusRepositoryError};
use crate::user::domain::UserId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for status catalog operations.
#[derive(Debug, Error)]
pub enum StatusCatalogError {
    /// The status does not exist.
    #[error("status not found: {0}")]
    NotFound(StatusId),

    /// A status with the same name already exists.
    #[error("duplicate status name: {0}")]
    DuplicateName(String),

    /// The status is still referenced by tasks.
    #[error("status still referenced by tasks: {0}")]
    InUse(StatusId),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(StatusRepositoryError),
}

impl From<StatusRepositoryError> for StatusCatalogError {
    fn from(err: StatusRepositoryError) -> Self {
        match err {
            StatusRepositoryError::NotFound(id) => Self::NotFound(id),
            StatusRepositoryError::DuplicateName(name) => Self::DuplicateName(name),
            StatusRepositoryError::InUse(id) => Self::InUse(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for status catalog service operations.
pub type StatusCatalogResult<T> = Result<T, StatusCatalogError>;

/// Status catalog orchestration service.
#[derive(Clone)]
pub struct StatusCatalogService<R, C>
where
    R: StatusRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> StatusCatalogService<R, C>
where
    R: StatusRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new status catalog service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Adds a status to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`StatusCatalogError::DuplicateName`] when the name is
    /// already taken, or a validation/repository error.
    pub async fn create_status(
        &self,
        name: impl Into<String> + Send,
        actor: UserId,
    ) -> StatusCatalogResult<Status> {
        let status = Status::new(name)?;

        // Pre-check for a friendlier error; the unique index still covers
        // the window between check and insert.
        if let Some(existing) = self.repository.find_by_name(status.name()).await? {
            return Err(StatusCatalogError::DuplicateName(
                existing.name().to_owned(),
            ));
        }

        let entry = AuditEntry::new(
            actor,
            AuditAction::StatusCreated,
            format!("status_id={}, name={}", status.id(), status.name()),
            &*self.clock,
        );
        self.repository.store(&status, &entry).await?;
        Ok(status)
    }

    /// Lists all statuses, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing cannot be retrieved.
    pub async fn list_statuses(&self) -> StatusCatalogResult<Vec<Status>> {
        Ok(self.repository.list().await?)
    }

    /// Renames a status.
    ///
    /// # Errors
    ///
    /// Returns [`StatusCatalogError::NotFound`] when the status does not
    /// exist, [`StatusCatalogError::DuplicateName`] when the new name is
    /// taken, or a validation/repository error.
    pub async fn rename_status(
        &self,
        id: StatusId,
        name: impl Into<String> + Send,
        actor: UserId,
    ) -> StatusCatalogResult<Status> {
        let mut status = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(StatusCatalogError::NotFound(id))?;
        status.rename(name)?;

        let entry = AuditEntry::new(
            actor,
            AuditAction::StatusUpdated,
            format!("status_id={id}, new_name={}", status.name()),
            &*self.clock,
        );
        self.repository.update(&status, &entry).await?;
        Ok(status)
    }

    /// Removes a status from the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`StatusCatalogError::NotFound`] when the status does not
    /// exist or [`StatusCatalogError::InUse`] when tasks still reference
    /// it.
    pub async fn delete_status(&self, id: StatusId, actor: UserId) -> StatusCatalogResult<()> {
        let entry = AuditEntry::new(
            actor,
            AuditAction::StatusDeleted,
            format!("status_id={id}"),
            &*self.clock,
        );
        self.repository.delete(id, &entry).await?;
        Ok(())
    }
}
