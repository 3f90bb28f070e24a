//! Error and guard-rejection types for the task domain.

use super::TaskStatus;
use thiserror::Error;

/// Errors returned while constructing or editing domain task values.
///
/// These correspond to malformed input; no mutation is attempted when one is
/// returned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The assignee handle is empty after trimming.
    #[error("task assignee must not be empty")]
    EmptyAssignee,

    /// A deadline value could not be parsed.
    #[error("invalid deadline '{0}', expected YYYY-MM-DD with optional HH:MM")]
    InvalidDeadline(String),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// A transition precondition that did not hold.
///
/// Guard failures are normal outcomes, not system errors: the caller turns
/// them into a user-facing rejection message and no mutation happens. This
/// replaces the "0 rows affected" convention of weaker storage layers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GuardRejection {
    /// Submit attempted on a task that is not pending.
    #[error("task is not awaiting work (status: {0}), so it cannot be submitted")]
    NotPending(TaskStatus),

    /// Approve or revision-request attempted on a task not under review.
    #[error("task is not under review (status: {0})")]
    NotInReview(TaskStatus),

    /// Return-to-work attempted on a task not in revision.
    #[error("task is not in revision (status: {0})")]
    NotInRevision(TaskStatus),

    /// The task already reached its terminal completed status.
    #[error("task is already completed")]
    AlreadyCompleted,

    /// The caller's handle does not match the stored assignee.
    #[error("only the task assignee may do that")]
    NotAssignee,

    /// The caller lacks the manager or admin role.
    #[error("only a manager or admin may do that")]
    NotManager,

    /// The caller is neither a manager nor the task creator.
    #[error("only a manager or the task creator may delete this task")]
    NotPermitted,

    /// The action did not originate from the configured work chat.
    #[error("this action is only available in the work chat")]
    OutsideWorkChat,
}
