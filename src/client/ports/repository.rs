//! Repository port for client persistence and lookup.

use crate::audit::domain::AuditEntry;
use crate::client::domain::{Client, ClientId};
use crate::pagination::Page;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for client repository operations.
pub type ClientRepositoryResult<T> = Result<T, ClientRepositoryError>;

/// Optional filters for client listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFilter {
    /// Case-insensitive substring matched against name and company.
    pub query: Option<String>,
}

impl ClientFilter {
    /// Creates an unfiltered listing request.
    #[must_use]
    pub const fn new() -> Self {
        Self { query: None }
    }

    /// Restricts the listing to clients matching the query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }
}

/// Client persistence contract.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Stores a new client together with the audit entry recording the
    /// creation, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`ClientRepositoryError::Persistence`] when the write
    /// fails.
    async fn store(&self, client: &Client, audit: &AuditEntry) -> ClientRepositoryResult<()>;

    /// Persists changes to an existing client together with the audit
    /// entry recording the change, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`ClientRepositoryError::NotFound`] when the client does
    /// not exist.
    async fn update(&self, client: &Client, audit: &AuditEntry) -> ClientRepositoryResult<()>;

    /// Finds a client by identifier.
    ///
    /// Returns `None` when the client does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ClientRepositoryError::Persistence`] when the lookup
    /// fails.
    async fn find_by_id(&self, id: ClientId) -> ClientRepositoryResult<Option<Client>>;

    /// Lists clients matching the filter, newest first.
    ///
    /// The filter is applied before pagination.
    ///
    /// # Errors
    ///
    /// Returns [`ClientRepositoryError::Persistence`] when the listing
    /// cannot be retrieved.
    async fn list(&self, filter: &ClientFilter, page: Page) -> ClientRepositoryResult<Vec<Client>>;

    /// Deletes a client together with the audit entry recording the
    /// deletion, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`ClientRepositoryError::NotFound`] when the client does
    /// not exist.
    async fn delete(&self, id: ClientId, audit: &AuditEntry) -> ClientRepositoryResult<()>;
}

/// Errors returned by client repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ClientRepositoryError {
    /// The client was not found.
    #[error("client not found: {0}")]
    NotFound(ClientId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ClientRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<diesel::result::Error> for ClientRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}
