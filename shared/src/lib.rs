//! Taskboard Shared Library
//!
//! This crate contains the domain models, API types, and validation
//! helpers used across the backend and its integration tests.

pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use models::{Priority, Task, User};
pub use types::*;
