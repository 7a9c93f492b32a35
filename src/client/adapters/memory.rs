//! In-memory client repository for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::audit::adapters::memory::InMemoryAuditLog;
use crate::audit::domain::AuditEntry;
use crate::client::domain::{Client, ClientId};
use crate::client::ports::{
    ClientFilter, ClientRepository, ClientRepositoryError, ClientRepositoryResult,
};
use crate::pagination::Page;

/// Thread-safe in-memory client repository.
#[derive(Debug, Clone)]
pub struct InMemoryClientRepository {
    state: Arc<RwLock<HashMap<ClientId, Client>>>,
    audit_log: InMemoryAuditLog,
}

fn poisoned(err: impl std::fmt::Display) -> ClientRepositoryError {
    ClientRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

impl InMemoryClientRepository {
    /// Creates an empty repository appending audit entries to the given
    /// log.
    #[must_use]
    pub fn new(audit_log: InMemoryAuditLog) -> Self {
        Self {
            state: Arc::new(RwLock::new(HashMap::new())),
            audit_log,
        }
    }

    fn record_audit(&self, audit: &AuditEntry) -> ClientRepositoryResult<()> {
        self.audit_log
            .record(audit.clone())
            .map_err(ClientRepositoryError::persistence)
    }
}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
    async fn store(&self, client: &Client, audit: &AuditEntry) -> ClientRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.insert(client.id(), client.clone());
        self.record_audit(audit)
    }

    async fn update(&self, client: &Client, audit: &AuditEntry) -> ClientRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if !state.contains_key(&client.id()) {
            return Err(ClientRepositoryError::NotFound(client.id()));
        }
        state.insert(client.id(), client.clone());
        self.record_audit(audit)
    }

    async fn find_by_id(&self, id: ClientId) -> ClientRepositoryResult<Option<Client>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.get(&id).cloned())
    }

    async fn list(&self, filter: &ClientFilter, page: Page) -> ClientRepositoryResult<Vec<Client>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut matching: Vec<Client> = state
            .values()
            .filter(|client| {
                filter
                    .query
                    .as_deref()
                    .is_none_or(|query| client.matches_query(query))
            })
            .cloned()
            .collect();
        matching.sort_by_key(|client| std::cmp::Reverse(client.created_at()));

        Ok(matching
            .into_iter()
            .skip(page.offset_usize())
            .take(page.limit_usize())
            .collect())
    }

    async fn delete(&self, id: ClientId, audit: &AuditEntry) -> ClientRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.remove(&id).is_none() {
            return Err(ClientRepositoryError::NotFound(id));
        }
        self.record_audit(audit)
    }
}
