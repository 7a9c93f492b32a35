//! Task workflow management for taskledger.
//!
//! This context owns tasks, the status catalog, and the append-only
//! status history. It implements the one workflow with real invariants in
//! the crate: the transactional status transition, which locks the task
//! row, validates the transition, applies the mutation, and appends one
//! history record and one audit entry atomically. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
