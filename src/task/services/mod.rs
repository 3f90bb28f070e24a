//! Application services for task lifecycle orchestration and dashboard
//! projections.

mod lifecycle;
mod stats;

pub use lifecycle::{
    TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService, TransitionOutcome,
};
pub use stats::{
    AssigneePerformance, DailyCompletion, PERFORMANCE_WINDOW_DAYS, StatsService, StatusBreakdown,
    assignee_performance, completion_series, status_breakdown,
};
