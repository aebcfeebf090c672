//! Tasklife: task lifecycle coordination for a personal task manager.
//!
//! The crate keeps archive storage, project assignments, and reminders
//! consistent when tasks are archived, restored, moved between projects, or
//! dragged across the done/undone sections of the today list.
//!
//! # Architecture
//!
//! Tasklife follows hexagonal architecture principles:
//!
//! - **Domain**: Task snapshots, archive records, and typed actions
//! - **Ports**: Reminder, persistence, attachment, and handler contracts
//! - **Adapters**: In-memory and JSON-file implementations of the ports
//! - **Services**: Lifecycle coordinators and the action dispatcher
//!
//! # Modules
//!
//! - [`config`]: Coordinator and dispatcher configuration
//! - [`task`]: Task lifecycle domain, ports, adapters, and services

pub mod config;
pub mod task;
