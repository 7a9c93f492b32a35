//! `PostgreSQL` implementations of the task workflow ports using Diesel.

pub mod models;
pub mod repository;
pub mod schema;
mod status;

pub use repository::PostgresTaskRepository;
pub use status::PostgresStatusRepository;
