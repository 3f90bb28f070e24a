//! Diesel row models for directory persistence.

use super::schema::users;
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Chat-platform user identifier.
    pub id: i64,
    /// Live username handle, if any.
    pub username: Option<String>,
    /// First name, if any.
    pub first_name: Option<String>,
    /// Last name, if any.
    pub last_name: Option<String>,
    /// Workflow role.
    pub role: String,
    /// Accumulated approval points.
    pub points: i64,
    /// Reserved balance in integer cents.
    pub balance_cents: i64,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Chat-platform user identifier.
    pub id: i64,
    /// Live username handle, if any.
    pub username: Option<String>,
    /// First name, if any.
    pub first_name: Option<String>,
    /// Last name, if any.
    pub last_name: Option<String>,
    /// Workflow role.
    pub role: String,
    /// Accumulated approval points.
    pub points: i64,
    /// Reserved balance in integer cents.
    pub balance_cents: i64,
}
