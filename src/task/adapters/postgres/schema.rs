//! Diesel schema for task persistence.

diesel::table! {
    /// Task records with lifecycle status, review artifacts, and metrics.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Task description.
        description -> Text,
        /// Assignee username handle.
        #[max_length = 255]
        assignee -> Varchar,
        /// Canonical deadline text, if any.
        #[max_length = 50]
        deadline -> Nullable<Varchar>,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Originating chat identifier.
        chat_id -> Int8,
        /// Creator user identifier.
        created_by -> Int8,
        /// Reviewer user identifier, if reviewed.
        reviewed_by -> Nullable<Int8>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Start-of-work timestamp.
        started_at -> Timestamptz,
        /// Submission timestamp, if submitted.
        submitted_for_review_at -> Nullable<Timestamptz>,
        /// Completion timestamp, if completed.
        completed_at -> Nullable<Timestamptz>,
        /// Latest reviewer comment, if any.
        review_comment -> Nullable<Text>,
        /// Latest rejection reason, if any.
        rejection_reason -> Nullable<Text>,
        /// Number of revision cycles.
        revision_count -> Int4,
        /// Minutes spent, fixed at approval.
        time_spent_minutes -> Nullable<Int8>,
        /// Efficiency score, fixed at approval.
        efficiency_score -> Nullable<Float8>,
    }
}
