//! Service layer for user role changes and activation toggles.

use crate::audit::domain::{AuditAction, AuditEntry};
use crate::user::domain::{RoleId, User, UserId};
use crate::user::ports::{UserRepository, UserRepositoryError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for user administration.
#[derive(Debug, Error)]
pub enum UserAdministrationError {
    /// The user to administer does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// The target role does not exist.
    #[error("role not found: {0}")]
    RoleNotFound(RoleId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

/// Result type for user administration operations.
pub type UserAdministrationResult<T> = Result<T, UserAdministrationError>;

/// User administration orchestration service.
#[derive(Clone)]
pub struct UserAdministrationService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> UserAdministrationService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new user administration service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Moves a user to a different role.
    ///
    /// # Errors
    ///
    /// Returns [`UserAdministrationError::UserNotFound`] or
    /// [`UserAdministrationError::RoleNotFound`] for missing records, or a
    /// repository error when persistence fails.
    pub async fn change_role(
        &self,
        user_id: UserId,
        role_id: RoleId,
        actor: UserId,
    ) -> UserAdministrationResult<User> {
        let mut user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or(UserAdministrationError::UserNotFound(user_id))?;
        self.repository
            .find_role(role_id)
            .await?
            .ok_or(UserAdministrationError::RoleNotFound(role_id))?;

        user.change_role(role_id);
        let entry = AuditEntry::new(
            actor,
            AuditAction::UserRoleChanged,
            format!("user_id={user_id}, role_id={role_id}"),
            &*self.clock,
        );
        self.repository.update(&user, &entry).await?;
        tracing::info!(%user_id, %role_id, "user role changed");
        Ok(user)
    }

    /// Activates or deactivates a user.
    ///
    /// # Errors
    ///
    /// Returns [`UserAdministrationError::UserNotFound`] when the user
    /// does not exist, or a repository error when persistence fails.
    pub async fn set_active(
        &self,
        user_id: UserId,
        is_active: bool,
        actor: UserId,
    ) -> UserAdministrationResult<User> {
        let mut user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or(UserAdministrationError::UserNotFound(user_id))?;

        user.set_active(is_active);
        let entry = AuditEntry::new(
            actor,
            AuditAction::UserActiveChanged,
            format!("user_id={user_id}, is_active={is_active}"),
            &*self.clock,
        );
        self.repository.update(&user, &entry).await?;
        Ok(user)
    }
}
