//! Orchestration services for the client directory.

pub mod directory;

pub use directory::{
    ClientDirectoryError, ClientDirectoryResult, ClientDirectoryService, ClientUpdate,
    CreateClientRequest,
};
