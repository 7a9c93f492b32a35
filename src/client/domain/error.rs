//! Error types for client domain validation.

use thiserror::Error;

/// Errors returned while constructing domain client values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientDomainError {
    /// The client name is empty after trimming.
    #[error("client name must not be empty")]
    EmptyName,
}
