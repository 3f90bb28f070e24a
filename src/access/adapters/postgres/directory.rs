//! `PostgreSQL` directory implementation for users, groups, and settings.

use super::{
    models::{NewUserRow, UserRow},
    schema::{chat_groups, settings, users},
};
use crate::access::{
    domain::{ChatId, Role, User, UserId, UserProfile, normalize_handle},
    ports::{
        DirectoryError, DirectoryResult, GroupRepository, SettingsRepository, UserRepository,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::upsert::excluded;

/// `PostgreSQL` connection pool type used by directory adapters.
pub type DirectoryPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed directory.
#[derive(Debug, Clone)]
pub struct PostgresDirectory {
    pool: DirectoryPgPool,
}

impl PostgresDirectory {
    /// Creates a new directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: DirectoryPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> DirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(DirectoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(DirectoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresDirectory {
    async fn upsert_user(&self, profile: &UserProfile) -> DirectoryResult<()> {
        let new_row = profile_to_new_row(profile);
        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .on_conflict(users::id)
                .do_update()
                .set((
                    users::username.eq(excluded(users::username)),
                    users::first_name.eq(excluded(users::first_name)),
                    users::last_name.eq(excluded(users::last_name)),
                ))
                .execute(connection)
                .map_err(DirectoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn find_user(&self, id: UserId) -> DirectoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.value()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(DirectoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn role_of(&self, id: UserId) -> DirectoryResult<Option<Role>> {
        self.run_blocking(move |connection| {
            let role_text = users::table
                .filter(users::id.eq(id.value()))
                .select(users::role)
                .first::<String>(connection)
                .optional()
                .map_err(DirectoryError::persistence)?;
            role_text
                .map(|text| Role::try_from(text.as_str()).map_err(DirectoryError::persistence))
                .transpose()
        })
        .await
    }

    async fn set_role(&self, id: UserId, role: Role) -> DirectoryResult<u64> {
        self.run_blocking(move |connection| {
            let affected = diesel::update(users::table.filter(users::id.eq(id.value())))
                .set(users::role.eq(role.as_str()))
                .execute(connection)
                .map_err(DirectoryError::persistence)?;
            u64::try_from(affected).map_err(DirectoryError::persistence)
        })
        .await
    }

    async fn increment_points(&self, assignee: &str, delta: i64) -> DirectoryResult<u64> {
        let wanted = normalize_handle(assignee);
        let fallback_id = assignee.trim().parse::<i64>().ok();
        self.run_blocking(move |connection| {
            if !wanted.is_empty() {
                let affected = increment_points_by_username(connection, &wanted, delta)?;
                if affected > 0 {
                    return Ok(affected);
                }
            }
            let Some(id) = fallback_id else {
                return Ok(0);
            };
            let affected = diesel::update(users::table.filter(users::id.eq(id)))
                .set(users::points.eq(users::points + delta))
                .execute(connection)
                .map_err(DirectoryError::persistence)?;
            u64::try_from(affected).map_err(DirectoryError::persistence)
        })
        .await
    }
}

#[async_trait]
impl GroupRepository for PostgresDirectory {
    async fn upsert_group(&self, chat_id: ChatId, title: &str) -> DirectoryResult<()> {
        let owned_title = title.to_owned();
        self.run_blocking(move |connection| {
            diesel::insert_into(chat_groups::table)
                .values((
                    chat_groups::chat_id.eq(chat_id.value()),
                    chat_groups::title.eq(&owned_title),
                ))
                .on_conflict(chat_groups::chat_id)
                .do_update()
                .set(chat_groups::title.eq(excluded(chat_groups::title)))
                .execute(connection)
                .map_err(DirectoryError::persistence)?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl SettingsRepository for PostgresDirectory {
    async fn get_setting(&self, key: &str) -> DirectoryResult<Option<String>> {
        let owned_key = key.to_owned();
        self.run_blocking(move |connection| {
            settings::table
                .filter(settings::key.eq(&owned_key))
                .select(settings::value)
                .first::<String>(connection)
                .optional()
                .map_err(DirectoryError::persistence)
        })
        .await
    }

    async fn set_setting(&self, key: &str, value: &str) -> DirectoryResult<()> {
        let owned_key = key.to_owned();
        let owned_value = value.to_owned();
        self.run_blocking(move |connection| {
            diesel::insert_into(settings::table)
                .values((
                    settings::key.eq(&owned_key),
                    settings::value.eq(&owned_value),
                ))
                .on_conflict(settings::key)
                .do_update()
                .set(settings::value.eq(excluded(settings::value)))
                .execute(connection)
                .map_err(DirectoryError::persistence)?;
            Ok(())
        })
        .await
    }
}

fn profile_to_new_row(profile: &UserProfile) -> NewUserRow {
    NewUserRow {
        id: profile.user_id.value(),
        username: profile.username.clone(),
        first_name: profile.first_name.clone(),
        last_name: profile.last_name.clone(),
        role: Role::default().as_str().to_owned(),
        points: 0,
        balance_cents: 0,
    }
}

fn row_to_user(row: UserRow) -> DirectoryResult<User> {
    let role = Role::try_from(row.role.as_str()).map_err(DirectoryError::persistence)?;
    Ok(User {
        user_id: UserId::new(row.id),
        username: row.username,
        first_name: row.first_name,
        last_name: row.last_name,
        role,
        points: row.points,
        balance_cents: row.balance_cents,
    })
}

/// Matches stored usernames against a normalized handle: case-insensitive,
/// ignoring one leading `@` in the stored value.
fn increment_points_by_username(
    connection: &mut PgConnection,
    normalized: &str,
    delta: i64,
) -> DirectoryResult<u64> {
    let affected = diesel::sql_query(concat!(
        "UPDATE users SET points = points + $1 ",
        "WHERE username IS NOT NULL ",
        "AND LOWER(LTRIM(username, '@')) = $2",
    ))
    .bind::<diesel::sql_types::BigInt, _>(delta)
    .bind::<diesel::sql_types::Text, _>(normalized)
    .execute(connection)
    .map_err(DirectoryError::persistence)?;
    u64::try_from(affected).map_err(DirectoryError::persistence)
}
