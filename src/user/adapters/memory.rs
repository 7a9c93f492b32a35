//! In-memory user directory for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::audit::adapters::memory::InMemoryAuditLog;
use crate::audit::domain::AuditEntry;
use crate::user::domain::{Role, RoleId, User, UserId};
use crate::user::ports::{UserRepository, UserRepositoryError, UserRepositoryResult};

/// Thread-safe in-memory user directory.
///
/// Users and roles are provisioned outside this crate, so the directory
/// exposes [`insert_user`](Self::insert_user) and
/// [`insert_role`](Self::insert_role) as seeding hooks for tests and
/// bootstrap wiring.
#[derive(Debug, Clone)]
pub struct InMemoryUserDirectory {
    state: Arc<RwLock<DirectoryState>>,
    audit_log: InMemoryAuditLog,
}

#[derive(Debug, Default)]
struct DirectoryState {
    users: HashMap<UserId, User>,
    roles: HashMap<RoleId, Role>,
}

fn poisoned(err: impl std::fmt::Display) -> UserRepositoryError {
    UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

impl InMemoryUserDirectory {
    /// Creates an empty directory appending audit entries to the given log.
    #[must_use]
    pub fn new(audit_log: InMemoryAuditLog) -> Self {
        Self {
            state: Arc::new(RwLock::new(DirectoryState::default())),
            audit_log,
        }
    }

    /// Seeds a user record.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::Persistence`] when the state lock is
    /// poisoned.
    pub fn insert_user(&self, user: User) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.users.insert(user.id(), user);
        Ok(())
    }

    /// Seeds a role record.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::Persistence`] when the state lock is
    /// poisoned.
    pub fn insert_role(&self, role: Role) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.roles.insert(role.id(), role);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserDirectory {
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_role(&self, id: RoleId) -> UserRepositoryResult<Option<Role>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.roles.get(&id).cloned())
    }

    async fn update(&self, user: &User, audit: &AuditEntry) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if !state.users.contains_key(&user.id()) {
            return Err(UserRepositoryError::NotFound(user.id()));
        }
        state.users.insert(user.id(), user.clone());
        self.audit_log
            .record(audit.clone())
            .map_err(UserRepositoryError::persistence)?;
        Ok(())
    }
}
