//! Efficiency scoring and approval metrics.
//!
//! Each revision cycle costs a fifth of the score, floored at 0.1; the point
//! award is the rounded score, so a task approved after three or more
//! revisions earns nothing. The rounding cliff is a deliberate incentive and
//! must not be smoothed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Penalty-decayed efficiency metric in `[0.1, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EfficiencyScore(f64);

impl EfficiencyScore {
    /// Lowest score regardless of how many revisions occurred.
    pub const FLOOR: f64 = 0.1;
    /// Score cost of one revision cycle.
    pub const REVISION_PENALTY: f64 = 0.2;

    /// Computes the score for a task approved after `revision_count`
    /// revision cycles. Exactly `1.0` for zero revisions.
    #[must_use]
    pub fn for_revisions(revision_count: u32) -> Self {
        if revision_count == 0 {
            return Self(1.0);
        }
        let penalized = Self::REVISION_PENALTY.mul_add(-f64::from(revision_count), 1.0);
        Self(penalized.max(Self::FLOOR))
    }

    /// Reconstructs a persisted score, clamping into the valid range.
    #[must_use]
    pub fn from_value(value: f64) -> Self {
        Self(value.clamp(Self::FLOOR, 1.0))
    }

    /// Returns the raw score value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Points awarded for this score: 1 for scores of 0.5 and above, 0
    /// below.
    #[must_use]
    pub fn points(self) -> i64 {
        self.0.round() as i64
    }
}

/// Metrics fixed at the moment a task is approved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApprovalMetrics {
    /// Minutes from the original start of work to approval, rounded to the
    /// nearest minute.
    pub time_spent_minutes: i64,
    /// Efficiency score for the completed pass.
    pub efficiency: EfficiencyScore,
}

impl ApprovalMetrics {
    /// Computes metrics for an approval happening at `approved_at`.
    ///
    /// `started_at` is the task's original start; revision cycles do not
    /// reset it, so elapsed time keeps accruing across rework loops.
    #[must_use]
    pub fn compute(
        started_at: DateTime<Utc>,
        approved_at: DateTime<Utc>,
        revision_count: u32,
    ) -> Self {
        let seconds = approved_at.signed_duration_since(started_at).num_seconds();
        let time_spent_minutes = (seconds as f64 / 60.0).round() as i64;
        Self {
            time_spent_minutes,
            efficiency: EfficiencyScore::for_revisions(revision_count),
        }
    }

    /// Points awarded for this approval.
    #[must_use]
    pub fn points_awarded(&self) -> i64 {
        self.efficiency.points()
    }
}
