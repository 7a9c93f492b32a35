//! Service layer for reading the audit trail.

use crate::audit::domain::AuditEntry;
use crate::audit::ports::{AuditLogError, AuditLogFilter, AuditLogRepository};
use crate::pagination::Page;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for audit trail queries.
#[derive(Debug, Error)]
pub enum AuditTrailError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] AuditLogError),
}

/// Result type for audit trail service operations.
pub type AuditTrailResult<T> = Result<T, AuditTrailError>;

/// Read-only audit trail query service.
#[derive(Clone)]
pub struct AuditTrailService<R>
where
    R: AuditLogRepository,
{
    repository: Arc<R>,
}

impl<R> AuditTrailService<R>
where
    R: AuditLogRepository,
{
    /// Creates a new audit trail service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Lists audit entries matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AuditTrailError::Repository`] when the listing cannot be
    /// retrieved.
    pub async fn list_entries(
        &self,
        filter: &AuditLogFilter,
        page: Page,
    ) -> AuditTrailResult<Vec<AuditEntry>> {
        Ok(self.repository.list(filter, page).await?)
    }
}
