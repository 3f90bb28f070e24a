//! Domain model for the task lifecycle.
//!
//! The state machine, scoring rules, and guard semantics live here, with no
//! infrastructure dependencies. Both persistence backends implement only the
//! ports; none of the rules in this module are duplicated elsewhere.

mod deadline;
mod error;
mod event;
mod ids;
mod score;
mod task;

pub use deadline::Deadline;
pub use error::{GuardRejection, ParseTaskStatusError, TaskDomainError};
pub use event::TaskEvent;
pub use ids::TaskId;
pub use score::{ApprovalMetrics, EfficiencyScore};
pub use task::{NewTask, PersistedTask, Task, TaskEdit, TaskStatus};
