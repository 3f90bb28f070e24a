//! Inline callback-action codec for the bot keyboard.
//!
//! Callback payloads are `<verb>_<task uuid>`; each verb maps 1:1 to a
//! lifecycle transition.

use crate::task::domain::TaskId;

/// One inline keyboard action against a specific task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineAction {
    /// Assignee marks the task done.
    Submit(TaskId),
    /// Reviewer approves the submitted task.
    Approve(TaskId),
    /// Reviewer sends the task back for rework.
    Revision(TaskId),
    /// Assignee resumes work after a rejection.
    Return(TaskId),
    /// Manager completes the task without review.
    Complete(TaskId),
    /// Task is removed permanently.
    Delete(TaskId),
}

impl InlineAction {
    /// Parses a callback payload; `None` for unknown verbs or malformed
    /// identifiers.
    #[must_use]
    pub fn parse(data: &str) -> Option<Self> {
        let (verb, raw_id) = data.split_once('_')?;
        let task_id = TaskId::parse(raw_id)?;
        match verb {
            "submit" => Some(Self::Submit(task_id)),
            "approve" => Some(Self::Approve(task_id)),
            "revision" => Some(Self::Revision(task_id)),
            "return" => Some(Self::Return(task_id)),
            "complete" => Some(Self::Complete(task_id)),
            "delete" => Some(Self::Delete(task_id)),
            _ => None,
        }
    }

    /// Renders the callback payload for this action.
    #[must_use]
    pub fn callback_data(&self) -> String {
        format!("{}_{}", self.verb(), self.task_id())
    }

    /// Returns the task the action targets.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        match self {
            Self::Submit(id)
            | Self::Approve(id)
            | Self::Revision(id)
            | Self::Return(id)
            | Self::Complete(id)
            | Self::Delete(id) => *id,
        }
    }

    /// Returns the payload verb.
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::Submit(_) => "submit",
            Self::Approve(_) => "approve",
            Self::Revision(_) => "revision",
            Self::Return(_) => "return",
            Self::Complete(_) => "complete",
            Self::Delete(_) => "delete",
        }
    }

    /// Human-facing button label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Submit(_) => "Mark done",
            Self::Approve(_) => "Approve",
            Self::Revision(_) => "Request changes",
            Self::Return(_) => "Resume work",
            Self::Complete(_) => "Complete",
            Self::Delete(_) => "Delete",
        }
    }
}
