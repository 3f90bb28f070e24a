//! Domain events emitted by applied lifecycle transitions.

use super::{ApprovalMetrics, Task, TaskId};
use crate::access::domain::ChatId;

/// An applied lifecycle transition, carrying the task state after the
/// transition. Consumed by the notification side of the system.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskEvent {
    /// A task was created and assigned.
    Created(Task),
    /// The assignee submitted the task for review.
    Submitted(Task),
    /// A reviewer approved the task.
    Approved {
        /// Task state after approval.
        task: Task,
        /// Metrics fixed by this approval.
        metrics: ApprovalMetrics,
        /// Points credited to the assignee (0 or 1).
        points_awarded: i64,
    },
    /// A reviewer sent the task back for rework.
    RevisionRequested {
        /// Task state after the rejection.
        task: Task,
        /// The reviewer's comment.
        comment: String,
    },
    /// The assignee resumed work after a revision request.
    Returned(Task),
    /// A manager completed the task directly, without review.
    Completed(Task),
    /// The task was permanently removed.
    Deleted {
        /// Identifier of the removed task.
        task_id: TaskId,
        /// Chat the task originated from.
        chat_id: ChatId,
        /// Title at the time of removal.
        title: String,
    },
}

impl TaskEvent {
    /// Returns the chat the event should be announced in.
    #[must_use]
    pub const fn chat_id(&self) -> ChatId {
        match self {
            Self::Created(task)
            | Self::Submitted(task)
            | Self::Returned(task)
            | Self::Completed(task)
            | Self::Approved { task, .. }
            | Self::RevisionRequested { task, .. } => task.chat_id(),
            Self::Deleted { chat_id, .. } => *chat_id,
        }
    }
}
