//! Domain model for the client directory.

mod client;
mod error;
mod ids;

pub use client::{Client, PersistedClientData};
pub use error::ClientDomainError;
pub use ids::ClientId;
