//! Authorization context resolution and idempotent registration.

use crate::access::{
    domain::{AccessContext, ChatId, Role, UserId, UserProfile},
    ports::{DirectoryError, GroupRepository, SettingsRepository, UserRepository},
};
use std::sync::Arc;
use thiserror::Error;

/// Setting key naming the single chat in which role-gated actions are
/// authorized.
pub const WORK_CHAT_KEY: &str = "work_chat_id";

/// Service-level errors for access operations.
#[derive(Debug, Error)]
pub enum AccessError {
    /// Directory operation failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Result type for access service operations.
pub type AccessResult<T> = Result<T, AccessError>;

/// Resolves who a caller is and where the call comes from.
#[derive(Clone)]
pub struct AccessService<U, G, S>
where
    U: UserRepository,
    G: GroupRepository,
    S: SettingsRepository,
{
    users: Arc<U>,
    groups: Arc<G>,
    settings: Arc<S>,
}

impl<U, G, S> AccessService<U, G, S>
where
    U: UserRepository,
    G: GroupRepository,
    S: SettingsRepository,
{
    /// Creates a new access service.
    #[must_use]
    pub const fn new(users: Arc<U>, groups: Arc<G>, settings: Arc<S>) -> Self {
        Self {
            users,
            groups,
            settings,
        }
    }

    /// Resolves the authorization context for one attempted action.
    ///
    /// Unknown users act as executors. When no work chat is configured (or
    /// the setting is blank), every chat is authorized; otherwise only the
    /// configured chat is.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Directory`] when the directory backend fails.
    pub async fn resolve_context(
        &self,
        user_id: UserId,
        chat_id: ChatId,
    ) -> AccessResult<AccessContext> {
        let role = self.users.role_of(user_id).await?.unwrap_or_default();
        let work_chat = self.settings.get_setting(WORK_CHAT_KEY).await?;
        let is_work_chat = work_chat
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .is_none_or(|value| value == chat_id.to_string());
        Ok(AccessContext::new(role, is_work_chat))
    }

    /// Configures the work chat restriction.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Directory`] when the directory backend fails.
    pub async fn set_work_chat(&self, chat_id: ChatId) -> AccessResult<()> {
        self.settings
            .set_setting(WORK_CHAT_KEY, &chat_id.to_string())
            .await?;
        Ok(())
    }

    /// Assigns a role to a user, reporting whether a record was affected.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Directory`] when the directory backend fails.
    pub async fn set_role(&self, user_id: UserId, role: Role) -> AccessResult<bool> {
        let affected = self.users.set_role(user_id, role).await?;
        Ok(affected > 0)
    }

    /// Records a bot interaction: upserts the acting user's profile and the
    /// originating chat group. Called on every inbound command, so both
    /// writes are idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Directory`] when the directory backend fails.
    pub async fn register_interaction(
        &self,
        profile: &UserProfile,
        chat_id: ChatId,
        chat_title: &str,
    ) -> AccessResult<()> {
        self.users.upsert_user(profile).await?;
        self.groups.upsert_group(chat_id, chat_title).await?;
        Ok(())
    }
}
