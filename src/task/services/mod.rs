//! Orchestration services for task workflow management.

pub mod catalog;
pub mod lifecycle;
pub mod workflow;

pub use catalog::{StatusCatalogError, StatusCatalogResult, StatusCatalogService};
pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService, TaskUpdate,
};
pub use workflow::{TaskWorkflowError, TaskWorkflowResult, TaskWorkflowService};
