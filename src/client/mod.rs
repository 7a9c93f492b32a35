//! Client directory management for taskledger.
//!
//! Clients are the customers tasks are performed for. This context covers
//! their creation, conditional field updates, filtered listing, and
//! deletion, each mutation paired with an audit entry in the same
//! unit-of-work. The module follows hexagonal architecture:
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
