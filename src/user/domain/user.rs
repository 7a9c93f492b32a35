//! User aggregate root.

use super::{RoleId, UserDomainError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// User aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    role_id: RoleId,
    is_active: bool,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted username.
    pub username: String,
    /// Persisted role reference.
    pub role_id: RoleId,
    /// Persisted active flag.
    pub is_active: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new active user.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyUsername`] when the username is
    /// empty after trimming.
    pub fn new(
        username: impl Into<String>,
        role_id: RoleId,
        clock: &impl Clock,
    ) -> Result<Self, UserDomainError> {
        let raw = username.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserDomainError::EmptyUsername);
        }
        Ok(Self {
            id: UserId::new(),
            username: trimmed.to_owned(),
            role_id,
            is_active: true,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            username: data.username,
            role_id: data.role_id,
            is_active: data.is_active,
            created_at: data.created_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the current role reference.
    #[must_use]
    pub const fn role_id(&self) -> RoleId {
        self.role_id
    }

    /// Returns whether the user may be assigned work.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Moves the user to a different role.
    pub const fn change_role(&mut self, role_id: RoleId) {
        self.role_id = role_id;
    }

    /// Activates or deactivates the user.
    pub const fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }
}
