//! Unit tests for the task module.
//!
//! Tests are organised by component: domain values, each coordinator, the
//! completion translator, related-data cleanup, and the dispatcher.
