//! Resolved authorization context for a single action.

use super::{Role, UserId, is_assignee};

/// The authorization facts gating one attempted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessContext {
    /// Role of the acting user, defaulting to executor when unknown.
    pub role: Role,
    /// Whether the action originates from the configured work chat (or no
    /// work chat is configured).
    pub is_work_chat: bool,
}

impl AccessContext {
    /// Creates a context from resolved facts.
    #[must_use]
    pub const fn new(role: Role, is_work_chat: bool) -> Self {
        Self { role, is_work_chat }
    }

    /// Whether the acting user may review, approve, and directly complete.
    #[must_use]
    pub const fn can_manage(self) -> bool {
        self.role.can_manage()
    }
}

/// The acting user of a transition attempt: platform identity, live handle,
/// and resolved authorization context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// Platform identity of the acting user.
    pub user_id: UserId,
    /// Live username handle, if the platform exposes one.
    pub username: Option<String>,
    /// Resolved authorization context for the originating chat.
    pub context: AccessContext,
}

impl Caller {
    /// Creates a caller description.
    #[must_use]
    pub const fn new(user_id: UserId, username: Option<String>, context: AccessContext) -> Self {
        Self {
            user_id,
            username,
            context,
        }
    }

    /// Whether this caller's live handle matches the stored assignee handle.
    #[must_use]
    pub fn is_assignee_of(&self, assignee: &str) -> bool {
        self.username
            .as_deref()
            .is_some_and(|handle| is_assignee(handle, assignee))
    }
}
