//! Read-only projections over the task collection for the dashboard.
//!
//! These views never mutate and are not part of the state machine.

use crate::access::domain::normalize_handle;
use crate::task::{
    domain::{Task, TaskStatus},
    ports::{TaskFilter, TaskRepository, TaskRepositoryResult},
};
use chrono::{Days, NaiveDate};
use mockable::Clock;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Days covered by the completion time series.
pub const PERFORMANCE_WINDOW_DAYS: u64 = 30;

/// Count of tasks per lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    /// Tasks awaiting work.
    pub pending: usize,
    /// Tasks under review.
    pub review: usize,
    /// Tasks sent back for rework.
    pub revision: usize,
    /// Completed tasks.
    pub completed: usize,
}

impl StatusBreakdown {
    /// Total number of tasks counted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.pending + self.review + self.revision + self.completed
    }
}

/// Aggregate per-assignee view over completed work.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssigneePerformance {
    /// Normalized assignee handle.
    pub assignee: String,
    /// Number of completed tasks.
    pub completed_tasks: usize,
    /// Revision cycles across all of the assignee's tasks.
    pub total_revisions: u64,
    /// Mean time-spent over approved tasks, in minutes.
    pub average_time_spent_minutes: f64,
    /// Mean efficiency score over approved tasks.
    pub average_efficiency: f64,
}

/// Completed-task count for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCompletion {
    /// The day.
    pub date: NaiveDate,
    /// Tasks completed on that day.
    pub completed: usize,
}

/// Counts tasks per status.
#[must_use]
pub fn status_breakdown(tasks: &[Task]) -> StatusBreakdown {
    let mut breakdown = StatusBreakdown::default();
    for task in tasks {
        match task.status() {
            TaskStatus::Pending => breakdown.pending += 1,
            TaskStatus::Review => breakdown.review += 1,
            TaskStatus::Revision => breakdown.revision += 1,
            TaskStatus::Completed => breakdown.completed += 1,
        }
    }
    breakdown
}

#[derive(Debug, Default)]
struct AssigneeAccumulator {
    completed_tasks: usize,
    total_revisions: u64,
    approved_count: usize,
    time_spent_sum: i64,
    efficiency_sum: f64,
}

/// Groups tasks by normalized assignee handle and averages approval metrics.
///
/// Only tasks that went through approval contribute to the averages;
/// directly completed tasks count toward totals but carry no metrics.
/// Sorted by completed count, busiest first.
#[must_use]
pub fn assignee_performance(tasks: &[Task]) -> Vec<AssigneePerformance> {
    let mut grouped: BTreeMap<String, AssigneeAccumulator> = BTreeMap::new();
    for task in tasks {
        let key = normalize_handle(task.assignee());
        let entry = grouped.entry(key).or_default();
        entry.total_revisions += u64::from(task.revision_count());
        if task.status() == TaskStatus::Completed {
            entry.completed_tasks += 1;
        }
        if let (Some(minutes), Some(score)) = (task.time_spent_minutes(), task.efficiency_score())
        {
            entry.approved_count += 1;
            entry.time_spent_sum += minutes;
            entry.efficiency_sum += score.value();
        }
    }

    let mut performance: Vec<AssigneePerformance> = grouped
        .into_iter()
        .map(|(assignee, acc)| {
            let divisor = if acc.approved_count == 0 {
                1.0
            } else {
                acc.approved_count as f64
            };
            AssigneePerformance {
                assignee,
                completed_tasks: acc.completed_tasks,
                total_revisions: acc.total_revisions,
                average_time_spent_minutes: acc.time_spent_sum as f64 / divisor,
                average_efficiency: acc.efficiency_sum / divisor,
            }
        })
        .collect();
    performance.sort_by(|lhs, rhs| {
        rhs.completed_tasks
            .cmp(&lhs.completed_tasks)
            .then_with(|| lhs.assignee.cmp(&rhs.assignee))
    });
    performance
}

/// Daily completed-task counts for the trailing window ending at `today`,
/// oldest day first.
#[must_use]
pub fn completion_series(tasks: &[Task], today: NaiveDate) -> Vec<DailyCompletion> {
    (0..PERFORMANCE_WINDOW_DAYS)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| {
            let completed = tasks
                .iter()
                .filter(|task| {
                    task.completed_at()
                        .is_some_and(|at| at.date_naive() == date)
                })
                .count();
            DailyCompletion { date, completed }
        })
        .collect()
}

/// Dashboard statistics service: repository reads plus the pure projections
/// above.
#[derive(Clone)]
pub struct StatsService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> StatsService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new statistics service.
    #[must_use]
    pub const fn new(tasks: Arc<R>, clock: Arc<C>) -> Self {
        Self { tasks, clock }
    }

    /// Status counts over all tasks.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn overview(&self) -> TaskRepositoryResult<StatusBreakdown> {
        let tasks = self.tasks.list(TaskFilter::all()).await?;
        Ok(status_breakdown(&tasks))
    }

    /// Per-assignee aggregates over all tasks.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn detailed(&self) -> TaskRepositoryResult<Vec<AssigneePerformance>> {
        let tasks = self.tasks.list(TaskFilter::all()).await?;
        Ok(assignee_performance(&tasks))
    }

    /// Thirty-day completion time series ending today.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn performance(&self) -> TaskRepositoryResult<Vec<DailyCompletion>> {
        let tasks = self.tasks.list(TaskFilter::all()).await?;
        let today = self.clock.utc().date_naive();
        Ok(completion_series(&tasks, today))
    }
}
