//! Repository port for task persistence.

use crate::access::domain::ChatId;
use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Listing filter for task queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Restrict results to tasks from one chat.
    pub chat_id: Option<ChatId>,
}

impl TaskFilter {
    /// Matches every task.
    #[must_use]
    pub const fn all() -> Self {
        Self { chat_id: None }
    }

    /// Matches tasks originating from `chat_id`.
    #[must_use]
    pub const fn for_chat(chat_id: ChatId) -> Self {
        Self {
            chat_id: Some(chat_id),
        }
    }
}

/// Task persistence contract.
///
/// Backends persist whole aggregates; every business rule stays in the
/// domain. Single-record atomicity only — the engine tolerates eventual
/// consistency between a task write and the follow-up point award.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn create(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Returns tasks matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] on backend failure.
    async fn list(&self, filter: TaskFilter) -> TaskRepositoryResult<Vec<Task>>;

    /// Finds a task by identifier; `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] on backend failure.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Removes a task permanently, reporting whether a record was affected.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] on backend failure.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
