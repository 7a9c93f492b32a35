//! User administration for taskledger.
//!
//! Users and roles are provisioned outside this crate; this context reads
//! them for lookups (e.g. task assignment checks) and mutates exactly two
//! things, each with an audit entry in the same unit-of-work: a user's
//! role and a user's active flag. The module follows hexagonal
//! architecture:
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
