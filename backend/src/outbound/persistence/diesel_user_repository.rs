//! PostgreSQL-backed `UserRepository`.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{DisplayName, User, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed user lookups.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert `seed`, refreshing the display name of users that already
    /// exist. Returns the number of rows written.
    ///
    /// A statement may touch each row once, so the last entry wins when
    /// `seed` repeats an id.
    pub async fn upsert_users(&self, seed: &[User]) -> Result<usize, UserPersistenceError> {
        if seed.is_empty() {
            return Ok(0);
        }
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        let now = Utc::now();
        let mut seen = HashSet::new();
        let rows: Vec<NewUserRow<'_>> = seed
            .iter()
            .rev()
            .filter(|user| seen.insert(*user.id().as_uuid()))
            .map(|user| NewUserRow {
                id: *user.id().as_uuid(),
                display_name: user.display_name().as_ref(),
                created_at: now,
                updated_at: now,
            })
            .collect();

        diesel::insert_into(users::table)
            .values(&rows)
            .on_conflict(users::id)
            .do_update()
            .set((
                users::display_name.eq(excluded(users::display_name)),
                users::updated_at.eq(excluded(users::updated_at)),
            ))
            .execute(&mut conn)
            .await
            .map_err(query_error)
    }
}

fn query_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let display_name = DisplayName::new(row.display_name)
        .map_err(|err| UserPersistenceError::query(err.to_string()))?;
    Ok(User::new(UserId::from_uuid(row.id), display_name))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(query_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        let wanted: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(wanted))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(query_error)?;

        rows.into_iter().map(row_to_user).collect()
    }
}
