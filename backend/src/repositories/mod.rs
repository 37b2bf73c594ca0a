//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod task;
pub mod user;

pub use task::{CreateTask, TaskFilters, TaskRepository, UpdateTask};
pub use user::{is_unique_violation, UserRepository};
