//! Port contracts for user administration.

pub mod repository;

pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
