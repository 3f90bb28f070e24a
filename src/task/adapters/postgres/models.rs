//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Assignee username handle.
    pub assignee: String,
    /// Canonical deadline text, if any.
    pub deadline: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Originating chat identifier.
    pub chat_id: i64,
    /// Creator user identifier.
    pub created_by: i64,
    /// Reviewer user identifier, if reviewed.
    pub reviewed_by: Option<i64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Start-of-work timestamp.
    pub started_at: DateTime<Utc>,
    /// Submission timestamp, if submitted.
    pub submitted_for_review_at: Option<DateTime<Utc>>,
    /// Completion timestamp, if completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Latest reviewer comment, if any.
    pub review_comment: Option<String>,
    /// Latest rejection reason, if any.
    pub rejection_reason: Option<String>,
    /// Number of revision cycles.
    pub revision_count: i32,
    /// Minutes spent, fixed at approval.
    pub time_spent_minutes: Option<i64>,
    /// Efficiency score, fixed at approval.
    pub efficiency_score: Option<f64>,
}

/// Insert and update model for task records.
///
/// `treat_none_as_null` matters: return-to-work clears the submission
/// timestamp and review comments, and those writes must reach the database
/// as NULLs.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskRecord {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Assignee username handle.
    pub assignee: String,
    /// Canonical deadline text, if any.
    pub deadline: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Originating chat identifier.
    pub chat_id: i64,
    /// Creator user identifier.
    pub created_by: i64,
    /// Reviewer user identifier, if reviewed.
    pub reviewed_by: Option<i64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Start-of-work timestamp.
    pub started_at: DateTime<Utc>,
    /// Submission timestamp, if submitted.
    pub submitted_for_review_at: Option<DateTime<Utc>>,
    /// Completion timestamp, if completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Latest reviewer comment, if any.
    pub review_comment: Option<String>,
    /// Latest rejection reason, if any.
    pub rejection_reason: Option<String>,
    /// Number of revision cycles.
    pub revision_count: i32,
    /// Minutes spent, fixed at approval.
    pub time_spent_minutes: Option<i64>,
    /// Efficiency score, fixed at approval.
    pub efficiency_score: Option<f64>,
}
