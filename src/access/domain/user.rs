//! User and group records managed by the directory.

use super::{ChatId, Role, UserId};
use serde::{Deserialize, Serialize};

/// A user record as held by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Chat-platform identity.
    pub user_id: UserId,
    /// Live username handle, if the platform exposes one.
    pub username: Option<String>,
    /// First name, if known.
    pub first_name: Option<String>,
    /// Last name, if known.
    pub last_name: Option<String>,
    /// Workflow role.
    pub role: Role,
    /// Points accumulated through approvals. Never decreased by the engine.
    pub points: i64,
    /// Reserved balance in integer cents; unused by the workflow core.
    pub balance_cents: i64,
}

/// Identity fields captured from a live chat interaction.
///
/// Upserting a profile updates name fields only; role, points, and balance
/// are preserved for existing users and defaulted for new ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Chat-platform identity.
    pub user_id: UserId,
    /// Live username handle, if any.
    pub username: Option<String>,
    /// First name, if any.
    pub first_name: Option<String>,
    /// Last name, if any.
    pub last_name: Option<String>,
}

impl UserProfile {
    /// Creates a profile with only the platform identity set.
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            username: None,
            first_name: None,
            last_name: None,
        }
    }

    /// Sets the username handle.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the first name.
    #[must_use]
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    /// Sets the last name.
    #[must_use]
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    /// Converts the profile into a fresh user record with default role and
    /// zeroed counters.
    #[must_use]
    pub fn into_new_user(self) -> User {
        User {
            user_id: self.user_id,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            role: Role::default(),
            points: 0,
            balance_cents: 0,
        }
    }
}

/// A chat group record, upserted whenever a bot command is seen in a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Chat identifier.
    pub chat_id: ChatId,
    /// Chat title at the time of the last interaction.
    pub title: String,
}
