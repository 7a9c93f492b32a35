//! In-memory audit log for tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::audit::domain::AuditEntry;
use crate::audit::ports::{AuditLogError, AuditLogFilter, AuditLogRepository, AuditLogResult};
use crate::pagination::Page;

/// Thread-safe in-memory audit log.
///
/// Cloning shares the underlying entry list, so the other contexts'
/// in-memory adapters can hold a handle and append into the same log a
/// test later reads back through the port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuditLog {
    entries: Arc<RwLock<Vec<AuditEntry>>>,
}

impl InMemoryAuditLog {
    /// Creates an empty in-memory audit log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    ///
    /// Called by the in-memory adapters at the end of a successful
    /// mutation, after all validation has passed.
    ///
    /// # Errors
    ///
    /// Returns [`AuditLogError::Persistence`] when the log lock is
    /// poisoned.
    pub fn record(&self, entry: AuditEntry) -> AuditLogResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|err| AuditLogError::persistence(std::io::Error::other(err.to_string())))?;
        entries.push(entry);
        Ok(())
    }

    /// Returns the number of recorded entries.
    ///
    /// # Errors
    ///
    /// Returns [`AuditLogError::Persistence`] when the log lock is
    /// poisoned.
    pub fn len(&self) -> AuditLogResult<usize> {
        let entries = self
            .entries
            .read()
            .map_err(|err| AuditLogError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(entries.len())
    }

    /// Returns `true` when no entries have been recorded.
    ///
    /// # Errors
    ///
    /// Returns [`AuditLogError::Persistence`] when the log lock is
    /// poisoned.
    pub fn is_empty(&self) -> AuditLogResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditLog {
    async fn list(&self, filter: &AuditLogFilter, page: Page) -> AuditLogResult<Vec<AuditEntry>> {
        let entries = self
            .entries
            .read()
            .map_err(|err| AuditLogError::persistence(std::io::Error::other(err.to_string())))?;

        let mut matching: Vec<AuditEntry> = entries
            .iter()
            .filter(|entry| filter.task_id.is_none_or(|id| entry.task_id == Some(id)))
            .filter(|entry| filter.user_id.is_none_or(|id| entry.user_id == id))
            .cloned()
            .collect();
        matching.sort_by_key(|entry| std::cmp::Reverse(entry.created_at));

        Ok(matching
            .into_iter()
            .skip(page.offset_usize())
            .take(page.limit_usize())
            .collect())
    }
}
