//! Task aggregate root and the lifecycle state machine.

use super::{
    ApprovalMetrics, Deadline, EfficiencyScore, GuardRejection, ParseTaskStatusError,
    TaskDomainError, TaskId,
};
use crate::access::domain::{ChatId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
///
/// `Pending → Review → Completed` is the happy path; `Review → Revision →
/// Pending` is the rework loop. Completed is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work is in progress or waiting to be resumed.
    Pending,
    /// Submitted and awaiting a reviewer decision.
    Review,
    /// Rejected by a reviewer; waiting for the assignee to resume.
    Revision,
    /// Approved or directly completed.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Review => "review",
            Self::Revision => "revision",
            Self::Completed => "completed",
        }
    }

    /// Whether no further lifecycle transition can leave this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "review" => Ok(Self::Review),
            "revision" => Ok(Self::Revision),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    assignee: String,
    description: String,
    deadline: Option<Deadline>,
    chat_id: ChatId,
    created_by: UserId,
}

impl NewTask {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        assignee: impl Into<String>,
        chat_id: ChatId,
        created_by: UserId,
    ) -> Self {
        Self {
            title: title.into(),
            assignee: assignee.into(),
            description: String::new(),
            deadline: None,
            chat_id,
            created_by,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the task deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Edit payload for title, description, and deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    /// Replacement title; must not be empty after trimming.
    pub title: String,
    /// Replacement description.
    pub description: String,
    /// Replacement deadline, or `None` to clear it.
    pub deadline: Option<Deadline>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    assignee: String,
    deadline: Option<Deadline>,
    status: TaskStatus,
    chat_id: ChatId,
    created_by: UserId,
    reviewed_by: Option<UserId>,
    created_at: DateTime<Utc>,
    started_at: DateTime<Utc>,
    submitted_for_review_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    review_comment: Option<String>,
    rejection_reason: Option<String>,
    revision_count: u32,
    time_spent_minutes: Option<i64>,
    efficiency_score: Option<EfficiencyScore>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTask {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted assignee handle.
    pub assignee: String,
    /// Persisted deadline, if any.
    pub deadline: Option<Deadline>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted originating chat.
    pub chat_id: ChatId,
    /// Persisted creator reference.
    pub created_by: UserId,
    /// Persisted reviewer reference, if any.
    pub reviewed_by: Option<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted start-of-work timestamp.
    pub started_at: DateTime<Utc>,
    /// Persisted submission timestamp, if any.
    pub submitted_for_review_at: Option<DateTime<Utc>>,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted reviewer comment, if any.
    pub review_comment: Option<String>,
    /// Persisted rejection reason, if any.
    pub rejection_reason: Option<String>,
    /// Persisted revision count.
    pub revision_count: u32,
    /// Persisted time-spent metric, if already approved once.
    pub time_spent_minutes: Option<i64>,
    /// Persisted efficiency score, if already approved once.
    pub efficiency_score: Option<EfficiencyScore>,
}

impl Task {
    /// Creates a new pending task; work is considered started immediately.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] or
    /// [`TaskDomainError::EmptyAssignee`] when a required field is blank.
    pub fn new(request: NewTask, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let title = request.title.trim().to_owned();
        if title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let assignee = request.assignee.trim().to_owned();
        if assignee.is_empty() {
            return Err(TaskDomainError::EmptyAssignee);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title,
            description: request.description.trim().to_owned(),
            assignee,
            deadline: request.deadline,
            status: TaskStatus::Pending,
            chat_id: request.chat_id,
            created_by: request.created_by,
            reviewed_by: None,
            created_at: timestamp,
            started_at: timestamp,
            submitted_for_review_at: None,
            completed_at: None,
            review_comment: None,
            rejection_reason: None,
            revision_count: 0,
            time_spent_minutes: None,
            efficiency_score: None,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTask) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            assignee: data.assignee,
            deadline: data.deadline,
            status: data.status,
            chat_id: data.chat_id,
            created_by: data.created_by,
            reviewed_by: data.reviewed_by,
            created_at: data.created_at,
            started_at: data.started_at,
            submitted_for_review_at: data.submitted_for_review_at,
            completed_at: data.completed_at,
            review_comment: data.review_comment,
            rejection_reason: data.rejection_reason,
            revision_count: data.revision_count,
            time_spent_minutes: data.time_spent_minutes,
            efficiency_score: data.efficiency_score,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the stored assignee handle.
    #[must_use]
    pub fn assignee(&self) -> &str {
        &self.assignee
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Deadline> {
        self.deadline
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the originating chat.
    #[must_use]
    pub const fn chat_id(&self) -> ChatId {
        self.chat_id
    }

    /// Returns the creator reference.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the reviewer reference, if any.
    #[must_use]
    pub const fn reviewed_by(&self) -> Option<UserId> {
        self.reviewed_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the start-of-work timestamp. Never reset, even across
    /// revision cycles.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Returns the submission timestamp, if currently submitted.
    #[must_use]
    pub const fn submitted_for_review_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_for_review_at
    }

    /// Returns the completion timestamp, if completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the latest reviewer comment, if any.
    #[must_use]
    pub fn review_comment(&self) -> Option<&str> {
        self.review_comment.as_deref()
    }

    /// Returns the latest rejection reason, if any.
    #[must_use]
    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    /// Returns how many revision cycles this task has been through.
    #[must_use]
    pub const fn revision_count(&self) -> u32 {
        self.revision_count
    }

    /// Returns the time-spent metric fixed at approval, if approved.
    #[must_use]
    pub const fn time_spent_minutes(&self) -> Option<i64> {
        self.time_spent_minutes
    }

    /// Returns the efficiency score fixed at approval, if approved.
    #[must_use]
    pub const fn efficiency_score(&self) -> Option<EfficiencyScore> {
        self.efficiency_score
    }

    /// Marks the task as submitted for review.
    ///
    /// # Errors
    ///
    /// Returns [`GuardRejection::NotPending`] unless the task is pending.
    pub fn submit_for_review(&mut self, clock: &impl Clock) -> Result<(), GuardRejection> {
        if self.status != TaskStatus::Pending {
            return Err(GuardRejection::NotPending(self.status));
        }
        self.status = TaskStatus::Review;
        self.submitted_for_review_at = Some(clock.utc());
        Ok(())
    }

    /// Approves the task, fixing its metrics and completing it.
    ///
    /// Metrics are computed exactly once per approval, from the original
    /// `started_at`. A completed task cannot be re-approved, so a double
    /// approval can never recompute metrics or re-award points.
    ///
    /// # Errors
    ///
    /// Returns [`GuardRejection::AlreadyCompleted`] for completed tasks and
    /// [`GuardRejection::NotInReview`] for tasks not under review.
    pub fn approve(
        &mut self,
        reviewer: UserId,
        comment: Option<&str>,
        clock: &impl Clock,
    ) -> Result<ApprovalMetrics, GuardRejection> {
        match self.status {
            TaskStatus::Completed => return Err(GuardRejection::AlreadyCompleted),
            TaskStatus::Review => {}
            other => return Err(GuardRejection::NotInReview(other)),
        }

        let now = clock.utc();
        let metrics = ApprovalMetrics::compute(self.started_at, now, self.revision_count);
        self.status = TaskStatus::Completed;
        self.completed_at = Some(now);
        self.reviewed_by = Some(reviewer);
        if let Some(text) = comment {
            self.review_comment = Some(text.to_owned());
        }
        self.time_spent_minutes = Some(metrics.time_spent_minutes);
        self.efficiency_score = Some(metrics.efficiency);
        Ok(metrics)
    }

    /// Sends the task back for rework with the reviewer's comment.
    ///
    /// # Errors
    ///
    /// Returns [`GuardRejection::NotInReview`] unless the task is under
    /// review.
    pub fn request_revision(
        &mut self,
        reviewer: UserId,
        comment: &str,
    ) -> Result<(), GuardRejection> {
        if self.status != TaskStatus::Review {
            return Err(GuardRejection::NotInReview(self.status));
        }
        self.status = TaskStatus::Revision;
        self.reviewed_by = Some(reviewer);
        self.review_comment = Some(comment.to_owned());
        self.rejection_reason = Some(comment.to_owned());
        self.revision_count += 1;
        Ok(())
    }

    /// Resumes work after a revision request, clearing the review artifacts
    /// of the rejected pass.
    ///
    /// # Errors
    ///
    /// Returns [`GuardRejection::NotInRevision`] unless the task is in
    /// revision.
    pub fn return_to_work(&mut self) -> Result<(), GuardRejection> {
        if self.status != TaskStatus::Revision {
            return Err(GuardRejection::NotInRevision(self.status));
        }
        self.status = TaskStatus::Pending;
        self.submitted_for_review_at = None;
        self.completed_at = None;
        self.review_comment = None;
        self.rejection_reason = None;
        Ok(())
    }

    /// Completes the task directly, bypassing review. No metrics or points
    /// are computed; this is distinct from approval.
    ///
    /// # Errors
    ///
    /// Returns [`GuardRejection::AlreadyCompleted`] for completed tasks.
    pub fn complete_direct(&mut self, clock: &impl Clock) -> Result<(), GuardRejection> {
        if self.status == TaskStatus::Completed {
            return Err(GuardRejection::AlreadyCompleted);
        }
        self.status = TaskStatus::Completed;
        self.completed_at = Some(clock.utc());
        Ok(())
    }

    /// Replaces the editable detail fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the new title is blank.
    pub fn edit_details(&mut self, edit: TaskEdit) -> Result<(), TaskDomainError> {
        let title = edit.title.trim().to_owned();
        if title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        self.title = title;
        self.description = edit.description.trim().to_owned();
        self.deadline = edit.deadline;
        Ok(())
    }
}
