//! Reply correlation for collecting revision comments.
//!
//! When a reviewer taps "request changes", the bot prompts for a comment
//! and remembers which task the awaited reply belongs to. Records expire
//! after five minutes; an expired correlation is discarded and a late
//! comment is never applied. Expired entries are pruned on access rather
//! than by a background sweep.

use crate::access::domain::MessageId;
use crate::task::domain::TaskId;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::RwLock;

const REPLY_TTL_MINUTES: i64 = 5;

#[derive(Debug, Clone, Copy)]
struct PendingReply {
    task_id: TaskId,
    expires_at: DateTime<Utc>,
}

/// Registry of awaited comment replies, keyed by the prompt message id.
#[derive(Debug, Default)]
pub struct ReplyCorrelations {
    entries: RwLock<HashMap<MessageId, PendingReply>>,
}

impl ReplyCorrelations {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers that a reply to `prompt` should carry the revision comment
    /// for `task_id`. Prunes expired entries while holding the lock.
    pub fn register(&self, prompt: MessageId, task_id: TaskId, clock: &impl Clock) {
        let now = clock.utc();
        let Ok(mut entries) = self.entries.write() else {
            return;
        };
        entries.retain(|_, pending| pending.expires_at > now);
        entries.insert(
            prompt,
            PendingReply {
                task_id,
                expires_at: now + TimeDelta::minutes(REPLY_TTL_MINUTES),
            },
        );
    }

    /// Claims the correlation for a reply to `prompt`, removing it. Returns
    /// `None` when no correlation exists or it has expired.
    pub fn claim(&self, prompt: MessageId, clock: &impl Clock) -> Option<TaskId> {
        let now = clock.utc();
        let Ok(mut entries) = self.entries.write() else {
            return None;
        };
        let pending = entries.remove(&prompt)?;
        (pending.expires_at > now).then_some(pending.task_id)
    }

    /// Number of live (unexpired, unclaimed) correlations.
    #[must_use]
    pub fn pending(&self, clock: &impl Clock) -> usize {
        let now = clock.utc();
        self.entries.read().map_or(0, |entries| {
            entries
                .values()
                .filter(|pending| pending.expires_at > now)
                .count()
        })
    }
}
