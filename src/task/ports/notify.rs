//! Notification port for announcing applied transitions.

use crate::task::domain::TaskEvent;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Outbound announcement contract.
///
/// Announcements are best-effort: a failure here never rolls back the state
/// transition that produced the event. The lifecycle service logs and
/// swallows errors from this port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskNotifier: Send + Sync {
    /// Announces an applied transition to the originating chat.
    ///
    /// Implementations may ignore events they have no message for.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] when rendering or delivery fails.
    async fn announce(&self, event: &TaskEvent) -> Result<(), NotifyError>;
}

/// Errors surfaced by notification implementations.
#[derive(Debug, Clone, Error)]
pub enum NotifyError {
    /// A message template failed to render.
    #[error("template render failed: {0}")]
    Render(String),

    /// The chat transport rejected the outbound message.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotifyError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}

/// A notifier that discards every event; useful for surfaces without an
/// outbound chat, such as the web dashboard acting on its own responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

#[async_trait]
impl TaskNotifier for NullNotifier {
    async fn announce(&self, _event: &TaskEvent) -> Result<(), NotifyError> {
        Ok(())
    }
}
