//! Adapter implementations for task lifecycle ports.

pub mod file;
pub mod memory;
