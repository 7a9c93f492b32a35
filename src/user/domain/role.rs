//! Role lookup record.

use super::{RoleId, UserDomainError};
use serde::{Deserialize, Serialize};

/// A role a user can hold.
///
/// Roles are read-only from this crate's perspective; they exist so role
/// changes can be validated against the seeded catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    id: RoleId,
    name: String,
}

impl Role {
    /// Creates a role with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyRoleName`] when the name is empty
    /// after trimming.
    pub fn new(name: impl Into<String>) -> Result<Self, UserDomainError> {
        Self::from_parts(RoleId::new(), name)
    }

    /// Reconstructs a role from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyRoleName`] when the name is empty
    /// after trimming.
    pub fn from_parts(id: RoleId, name: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserDomainError::EmptyRoleName);
        }
        Ok(Self {
            id,
            name: trimmed.to_owned(),
        })
    }

    /// Returns the role identifier.
    #[must_use]
    pub const fn id(&self) -> RoleId {
        self.id
    }

    /// Returns the role name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
