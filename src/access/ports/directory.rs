//! Directory ports for user, group, and settings persistence.

use crate::access::domain::{ChatId, Role, User, UserId, UserProfile};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// User persistence contract.
///
/// Upserts are idempotent: the bot surface calls [`upsert_user`] on every
/// interaction. Points are keyed by user identity while task assignment is
/// keyed by username text, so [`increment_points`] resolves a normalized
/// username first and falls back to a numeric user id.
///
/// [`upsert_user`]: UserRepository::upsert_user
/// [`increment_points`]: UserRepository::increment_points
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user or refreshes the name fields of an existing record.
    ///
    /// Role, points, and balance of an existing record are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] on backend failure.
    async fn upsert_user(&self, profile: &UserProfile) -> DirectoryResult<()>;

    /// Finds a user by platform identity.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] on backend failure.
    async fn find_user(&self, id: UserId) -> DirectoryResult<Option<User>>;

    /// Returns the role of a user, or `None` when the user is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] on backend failure.
    async fn role_of(&self, id: UserId) -> DirectoryResult<Option<Role>>;

    /// Sets a user's role, reporting the number of affected records.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] on backend failure.
    async fn set_role(&self, id: UserId, role: Role) -> DirectoryResult<u64>;

    /// Adds `delta` points to the user identified by `assignee`, which is
    /// matched as a normalized username first and parsed as a numeric user
    /// id as a fallback. Reports the number of affected records; zero means
    /// no user matched.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] on backend failure.
    async fn increment_points(&self, assignee: &str, delta: i64) -> DirectoryResult<u64>;
}

/// Chat group persistence contract.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Inserts a group or refreshes its title.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] on backend failure.
    async fn upsert_group(&self, chat_id: ChatId, title: &str) -> DirectoryResult<()>;
}

/// Key-value settings persistence contract.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Returns the value for `key`, or `None` when unset.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] on backend failure.
    async fn get_setting(&self, key: &str) -> DirectoryResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] on backend failure.
    async fn set_setting(&self, key: &str, value: &str) -> DirectoryResult<()>;
}

/// Errors returned by directory implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
