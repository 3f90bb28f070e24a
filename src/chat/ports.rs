//! Port contracts toward the chat transport.
//!
//! The transport itself (polling, sessions, API client) lives outside this
//! crate; these traits are what the core needs from it.

use crate::access::domain::{ChatId, UserId};
use crate::task::ports::NotifyError;
use async_trait::async_trait;

/// Outbound message delivery.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatSender: Send + Sync {
    /// Sends `text` to `chat_id`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] when the transport rejects the message.
    async fn send(&self, chat_id: ChatId, text: &str) -> Result<(), NotifyError>;
}

/// Live caller identity lookup.
///
/// Authorization compares the live chat handle against stored assignee
/// text, so the bot surface resolves the acting user's current username
/// through this port rather than trusting stored data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Returns the caller's current username handle, if the platform
    /// exposes one.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] when the transport lookup fails.
    async fn caller_username(
        &self,
        chat_id: ChatId,
        user_id: UserId,
    ) -> Result<Option<String>, NotifyError>;
}
