//! Task lifecycle orchestration: guards, transitions, scoring, point award,
//! and best-effort notification.

use crate::access::{
    domain::Caller,
    ports::{DirectoryError, UserRepository},
};
use crate::task::{
    domain::{
        GuardRejection, NewTask, Task, TaskDomainError, TaskEdit, TaskEvent, TaskId,
    },
    ports::{TaskFilter, TaskNotifier, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed; no mutation was attempted.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Directory operation failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Outcome of one attempted transition.
///
/// Guard failures and missing tasks are outcomes, not errors: callers map
/// `Rejected` to a friendly message (or HTTP 400) and `NotFound` to 404.
/// Only infrastructure faults surface as [`TaskLifecycleError`].
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    /// The transition was applied; carries the task state afterwards.
    Applied(Task),
    /// A guard did not hold; nothing was mutated.
    Rejected(GuardRejection),
    /// The referenced task does not exist.
    NotFound,
}

impl TransitionOutcome {
    /// Whether the transition was applied.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// Returns the task when the transition was applied.
    #[must_use]
    pub const fn applied(&self) -> Option<&Task> {
        match self {
            Self::Applied(task) => Some(task),
            Self::Rejected(_) | Self::NotFound => None,
        }
    }
}

/// Task lifecycle orchestration service.
///
/// The single place where transition rules run; both persistence backends
/// sit behind the repository port and implement none of the rules.
#[derive(Clone)]
pub struct TaskLifecycleService<R, U, C>
where
    R: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    users: Arc<U>,
    clock: Arc<C>,
    notifier: Arc<dyn TaskNotifier>,
}

impl<R, U, C> TaskLifecycleService<R, U, C>
where
    R: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(
        tasks: Arc<R>,
        users: Arc<U>,
        clock: Arc<C>,
        notifier: Arc<dyn TaskNotifier>,
    ) -> Self {
        Self {
            tasks,
            users,
            clock,
            notifier,
        }
    }

    /// Creates a new pending task and announces the assignment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the title or assignee is
    /// blank, or [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn create(&self, request: NewTask) -> TaskLifecycleResult<Task> {
        let task = Task::new(request, &*self.clock)?;
        self.tasks.create(&task).await?;
        self.announce(TaskEvent::Created(task.clone())).await;
        Ok(task)
    }

    /// Submits a pending task for review. Only the assignee may submit, and
    /// only from the work chat.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn submit(
        &self,
        id: TaskId,
        caller: &Caller,
    ) -> TaskLifecycleResult<TransitionOutcome> {
        let Some(mut task) = self.tasks.find_by_id(id).await? else {
            return Ok(TransitionOutcome::NotFound);
        };
        if let Some(rejection) = work_chat_guard(caller) {
            return Ok(TransitionOutcome::Rejected(rejection));
        }
        if !caller.is_assignee_of(task.assignee()) {
            return Ok(TransitionOutcome::Rejected(GuardRejection::NotAssignee));
        }
        if let Err(rejection) = task.submit_for_review(&*self.clock) {
            return Ok(TransitionOutcome::Rejected(rejection));
        }
        self.tasks.update(&task).await?;
        self.announce(TaskEvent::Submitted(task.clone())).await;
        Ok(TransitionOutcome::Applied(task))
    }

    /// Approves a task under review: completes it, fixes its metrics, and
    /// awards points to the resolved assignee. Manager-gated.
    ///
    /// The point award is a secondary write, deliberately not atomic with
    /// the status write; its failure is logged and does not undo the
    /// approval.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn approve(
        &self,
        id: TaskId,
        caller: &Caller,
        comment: Option<&str>,
    ) -> TaskLifecycleResult<TransitionOutcome> {
        let Some(mut task) = self.tasks.find_by_id(id).await? else {
            return Ok(TransitionOutcome::NotFound);
        };
        if let Some(rejection) = work_chat_guard(caller) {
            return Ok(TransitionOutcome::Rejected(rejection));
        }
        if !caller.context.can_manage() {
            return Ok(TransitionOutcome::Rejected(GuardRejection::NotManager));
        }
        let metrics = match task.approve(caller.user_id, comment, &*self.clock) {
            Ok(metrics) => metrics,
            Err(rejection) => return Ok(TransitionOutcome::Rejected(rejection)),
        };
        self.tasks.update(&task).await?;

        let points_awarded = metrics.points_awarded();
        if points_awarded > 0 {
            self.award_points(&task, points_awarded).await;
        }

        self.announce(TaskEvent::Approved {
            task: task.clone(),
            metrics,
            points_awarded,
        })
        .await;
        Ok(TransitionOutcome::Applied(task))
    }

    /// Sends a task under review back for rework with a comment.
    /// Manager-gated.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn request_revision(
        &self,
        id: TaskId,
        caller: &Caller,
        comment: &str,
    ) -> TaskLifecycleResult<TransitionOutcome> {
        let Some(mut task) = self.tasks.find_by_id(id).await? else {
            return Ok(TransitionOutcome::NotFound);
        };
        if let Some(rejection) = work_chat_guard(caller) {
            return Ok(TransitionOutcome::Rejected(rejection));
        }
        if !caller.context.can_manage() {
            return Ok(TransitionOutcome::Rejected(GuardRejection::NotManager));
        }
        if let Err(rejection) = task.request_revision(caller.user_id, comment) {
            return Ok(TransitionOutcome::Rejected(rejection));
        }
        self.tasks.update(&task).await?;
        self.announce(TaskEvent::RevisionRequested {
            task: task.clone(),
            comment: comment.to_owned(),
        })
        .await;
        Ok(TransitionOutcome::Applied(task))
    }

    /// Resumes work on a task in revision. Assignee-gated.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn return_to_work(
        &self,
        id: TaskId,
        caller: &Caller,
    ) -> TaskLifecycleResult<TransitionOutcome> {
        let Some(mut task) = self.tasks.find_by_id(id).await? else {
            return Ok(TransitionOutcome::NotFound);
        };
        if let Some(rejection) = work_chat_guard(caller) {
            return Ok(TransitionOutcome::Rejected(rejection));
        }
        if !caller.is_assignee_of(task.assignee()) {
            return Ok(TransitionOutcome::Rejected(GuardRejection::NotAssignee));
        }
        if let Err(rejection) = task.return_to_work() {
            return Ok(TransitionOutcome::Rejected(rejection));
        }
        self.tasks.update(&task).await?;
        self.announce(TaskEvent::Returned(task.clone())).await;
        Ok(TransitionOutcome::Applied(task))
    }

    /// Completes a task directly, bypassing review, with no metrics or
    /// points. Manager-gated.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn complete(
        &self,
        id: TaskId,
        caller: &Caller,
    ) -> TaskLifecycleResult<TransitionOutcome> {
        let Some(mut task) = self.tasks.find_by_id(id).await? else {
            return Ok(TransitionOutcome::NotFound);
        };
        if let Some(rejection) = work_chat_guard(caller) {
            return Ok(TransitionOutcome::Rejected(rejection));
        }
        if !caller.context.can_manage() {
            return Ok(TransitionOutcome::Rejected(GuardRejection::NotManager));
        }
        if let Err(rejection) = task.complete_direct(&*self.clock) {
            return Ok(TransitionOutcome::Rejected(rejection));
        }
        self.tasks.update(&task).await?;
        self.announce(TaskEvent::Completed(task.clone())).await;
        Ok(TransitionOutcome::Applied(task))
    }

    /// Removes a task permanently. Allowed for managers and for the task
    /// creator; terminal, no undo.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn delete(
        &self,
        id: TaskId,
        caller: &Caller,
    ) -> TaskLifecycleResult<TransitionOutcome> {
        let Some(task) = self.tasks.find_by_id(id).await? else {
            return Ok(TransitionOutcome::NotFound);
        };
        if let Some(rejection) = work_chat_guard(caller) {
            return Ok(TransitionOutcome::Rejected(rejection));
        }
        if !caller.context.can_manage() && caller.user_id != task.created_by() {
            return Ok(TransitionOutcome::Rejected(GuardRejection::NotPermitted));
        }
        let removed = self.tasks.delete(id).await?;
        if !removed {
            return Ok(TransitionOutcome::NotFound);
        }
        self.announce(TaskEvent::Deleted {
            task_id: id,
            chat_id: task.chat_id(),
            title: task.title().to_owned(),
        })
        .await;
        Ok(TransitionOutcome::Applied(task))
    }

    /// Replaces a task's editable details (title, description, deadline).
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for a blank title and
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn update_details(
        &self,
        id: TaskId,
        edit: TaskEdit,
    ) -> TaskLifecycleResult<TransitionOutcome> {
        let Some(mut task) = self.tasks.find_by_id(id).await? else {
            return Ok(TransitionOutcome::NotFound);
        };
        task.edit_details(edit)?;
        self.tasks.update(&task).await?;
        Ok(TransitionOutcome::Applied(task))
    }

    /// Returns a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn get(&self, id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.tasks.find_by_id(id).await?)
    }

    /// Lists tasks matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn list(&self, filter: TaskFilter) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.tasks.list(filter).await?)
    }

    /// Credits the assignee. Zero affected records means the assignee has
    /// no user record yet; both that and backend failures are logged and
    /// accepted, never undoing the approval.
    async fn award_points(&self, task: &Task, points: i64) {
        match self.users.increment_points(task.assignee(), points).await {
            Ok(0) => {
                tracing::warn!(
                    task_id = %task.id(),
                    assignee = task.assignee(),
                    "point award matched no user record"
                );
            }
            Ok(_) => {}
            Err(err) => {
                tracing::error!(
                    task_id = %task.id(),
                    assignee = task.assignee(),
                    error = %err,
                    "point award failed after approval"
                );
            }
        }
    }

    /// Announces an event, logging and swallowing delivery failures.
    async fn announce(&self, event: TaskEvent) {
        if let Err(err) = self.notifier.announce(&event).await {
            tracing::warn!(error = %err, "notification failed after applied transition");
        }
    }
}

/// Work-chat gate shared by every role- or assignee-gated transition.
const fn work_chat_guard(caller: &Caller) -> Option<GuardRejection> {
    if caller.context.is_work_chat {
        None
    } else {
        Some(GuardRejection::OutsideWorkChat)
    }
}
