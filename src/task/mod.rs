//! Task lifecycle coordination.
//!
//! Archiving finished tasks, restoring them, moving tasks between projects,
//! and keeping completion in step with the "today" list. Each operation
//! reads a task snapshot from an action payload and turns it into reminder
//! and persistence writes, or into a new action for the owning store. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Coordinators and the action dispatcher in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
