//! Internal Diesel row structs. Never exposed outside the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{registros, users};

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub display_name: String,
}

/// Row written when seeding `users`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub display_name: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row read from `registros`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = registros)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RegistroRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub fields: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row written on insert.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = registros)]
pub(crate) struct NewRegistroRow<'a> {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub fields: &'a serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset written on update. A `None` owner clears the column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = registros)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct RegistroUpdate<'a> {
    pub user_id: Option<Uuid>,
    pub fields: &'a serde_json::Value,
    pub updated_at: DateTime<Utc>,
}
