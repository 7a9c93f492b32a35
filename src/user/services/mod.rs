//! Orchestration services for user administration.

pub mod administration;

pub use administration::{
    UserAdministrationError, UserAdministrationResult, UserAdministrationService,
};
