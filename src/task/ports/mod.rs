//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod notify;
pub mod repository;

pub use notify::{NotifyError, NullNotifier, TaskNotifier};
pub use repository::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult};
