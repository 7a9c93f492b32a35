//! Port contracts for the client directory.

pub mod repository;

pub use repository::{ClientFilter, ClientRepository, ClientRepositoryError, ClientRepositoryResult};
