//! Integration tests over the in-memory adapters.
//!
//! Tests are organized into modules by functionality:
//! - `workflow_tests`: End-to-end status transitions with history and audit
//! - `directory_tests`: Client and user flows composed with the audit trail
//! - `concurrency_tests`: Transition serialization on a contended task

mod in_memory {
    pub mod helpers;

    mod concurrency_tests;
    mod directory_tests;
    mod workflow_tests;
}
