//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{TaskRecord, TaskRow},
    schema::tasks,
};
use crate::access::domain::{ChatId, UserId};
use crate::task::{
    domain::{Deadline, EfficiencyScore, PersistedTask, Task, TaskId, TaskStatus},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let record = to_record(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&record)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn list(&self, filter: TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .select(TaskRow::as_select())
                .order(tasks::created_at.desc())
                .into_boxed();
            if let Some(wanted_chat) = filter.chat_id {
                query = query.filter(tasks::chat_id.eq(wanted_chat.value()));
            }
            let rows = query
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let record = to_record(task)?;

        self.run_blocking(move |connection| {
            let affected =
                diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                    .set(&record)
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(affected > 0)
        })
        .await
    }
}

fn to_record(task: &Task) -> TaskRepositoryResult<TaskRecord> {
    let revision_count =
        i32::try_from(task.revision_count()).map_err(TaskRepositoryError::persistence)?;

    Ok(TaskRecord {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        assignee: task.assignee().to_owned(),
        deadline: task.deadline().map(|deadline| deadline.to_string()),
        status: task.status().as_str().to_owned(),
        chat_id: task.chat_id().value(),
        created_by: task.created_by().value(),
        reviewed_by: task.reviewed_by().map(UserId::value),
        created_at: task.created_at(),
        started_at: task.started_at(),
        submitted_for_review_at: task.submitted_for_review_at(),
        completed_at: task.completed_at(),
        review_comment: task.review_comment().map(str::to_owned),
        rejection_reason: task.rejection_reason().map(str::to_owned),
        revision_count,
        time_spent_minutes: task.time_spent_minutes(),
        efficiency_score: task.efficiency_score().map(EfficiencyScore::value),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let deadline = row
        .deadline
        .as_deref()
        .map(str::parse::<Deadline>)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    let revision_count =
        u32::try_from(row.revision_count).map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTask {
        id: TaskId::from_uuid(row.id),
        title: row.title,
        description: row.description,
        assignee: row.assignee,
        deadline,
        status,
        chat_id: ChatId::new(row.chat_id),
        created_by: UserId::new(row.created_by),
        reviewed_by: row.reviewed_by.map(UserId::new),
        created_at: row.created_at,
        started_at: row.started_at,
        submitted_for_review_at: row.submitted_for_review_at,
        completed_at: row.completed_at,
        review_comment: row.review_comment,
        rejection_reason: row.rejection_reason,
        revision_count,
        time_spent_minutes: row.time_spent_minutes,
        efficiency_score: row.efficiency_score.map(EfficiencyScore::from_value),
    };
    Ok(Task::from_persisted(data))
}
