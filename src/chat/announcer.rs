//! Bridges lifecycle events to the chat transport.

use super::{ports::ChatSender, templates::render_event};
use crate::task::domain::TaskEvent;
use crate::task::ports::{NotifyError, TaskNotifier};
use async_trait::async_trait;
use std::sync::Arc;

/// Notifier implementation that renders an event's message and sends it to
/// the event's originating chat.
#[derive(Clone)]
pub struct ChatAnnouncer<S>
where
    S: ChatSender,
{
    sender: Arc<S>,
}

impl<S> ChatAnnouncer<S>
where
    S: ChatSender,
{
    /// Creates an announcer over a chat transport.
    #[must_use]
    pub const fn new(sender: Arc<S>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl<S> TaskNotifier for ChatAnnouncer<S>
where
    S: ChatSender,
{
    async fn announce(&self, event: &TaskEvent) -> Result<(), NotifyError> {
        let Some(text) = render_event(event)? else {
            return Ok(());
        };
        self.sender.send(event.chat_id(), &text).await
    }
}
