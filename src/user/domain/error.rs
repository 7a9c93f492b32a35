//! Error types for user domain validation.

use thiserror::Error;

/// Errors returned while constructing domain user values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The role name is empty after trimming.
    #[error("role name must not be empty")]
    EmptyRoleName,
}
