//! PostgreSQL-backed `RegistroRepository`.
//!
//! Client fields live in a `jsonb` column; identity, owner and timestamps are
//! first-class columns so listings can filter and order on them.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde_json::Value;

use crate::domain::ports::{RegistroRepository, RegistroRepositoryError};
use crate::domain::{Registro, RegistroFields, RegistroId, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewRegistroRow, RegistroRow, RegistroUpdate};
use super::pool::DbPool;
use super::schema::registros;

/// Diesel-backed registro store.
#[derive(Clone)]
pub struct DieselRegistroRepository {
    pool: DbPool,
}

impl DieselRegistroRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn connection(
        &self,
    ) -> Result<
        diesel_async::pooled_connection::bb8::PooledConnection<'_, diesel_async::AsyncPgConnection>,
        RegistroRepositoryError,
    > {
        self.pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, RegistroRepositoryError::connection))
    }
}

fn query_error(error: diesel::result::Error) -> RegistroRepositoryError {
    map_diesel_error(
        error,
        RegistroRepositoryError::query,
        RegistroRepositoryError::connection,
    )
}

fn row_to_registro(row: RegistroRow) -> Result<Registro, RegistroRepositoryError> {
    let RegistroRow {
        id,
        user_id,
        fields,
        created_at,
        updated_at,
    } = row;
    let Value::Object(fields) = fields else {
        return Err(RegistroRepositoryError::query(format!(
            "registro {id} has non-object fields"
        )));
    };
    Ok(Registro::from_parts(
        RegistroId::from_uuid(id),
        user_id.map(UserId::from_uuid),
        RegistroFields::from_map(fields),
        created_at,
        updated_at,
    ))
}

fn fields_value(registro: &Registro) -> Value {
    Value::Object(registro.fields().as_map().clone())
}

fn rows_to_registros(rows: Vec<RegistroRow>) -> Result<Vec<Registro>, RegistroRepositoryError> {
    rows.into_iter().map(row_to_registro).collect()
}

#[async_trait]
impl RegistroRepository for DieselRegistroRepository {
    async fn list_all(&self) -> Result<Vec<Registro>, RegistroRepositoryError> {
        let mut conn = self.connection().await?;
        let rows: Vec<RegistroRow> = registros::table
            .order((registros::created_at.asc(), registros::id.asc()))
            .select(RegistroRow::as_select())
            .load(&mut conn)
            .await
            .map_err(query_error)?;
        rows_to_registros(rows)
    }

    async fn find_by_id(
        &self,
        id: &RegistroId,
    ) -> Result<Option<Registro>, RegistroRepositoryError> {
        let mut conn = self.connection().await?;
        let row = registros::table
            .filter(registros::id.eq(id.as_uuid()))
            .select(RegistroRow::as_select())
            .first::<RegistroRow>(&mut conn)
            .await
            .optional()
            .map_err(query_error)?;
        row.map(row_to_registro).transpose()
    }

    async fn insert(&self, registro: &Registro) -> Result<(), RegistroRepositoryError> {
        let mut conn = self.connection().await?;
        let fields = fields_value(registro);
        let row = NewRegistroRow {
            id: *registro.id().as_uuid(),
            user_id: registro.user().map(|user| *user.as_uuid()),
            fields: &fields,
            created_at: registro.created_at(),
            updated_at: registro.updated_at(),
        };
        diesel::insert_into(registros::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(query_error)
    }

    async fn update(&self, registro: &Registro) -> Result<bool, RegistroRepositoryError> {
        let mut conn = self.connection().await?;
        let fields = fields_value(registro);
        let changes = RegistroUpdate {
            user_id: registro.user().map(|user| *user.as_uuid()),
            fields: &fields,
            updated_at: registro.updated_at(),
        };
        let affected = diesel::update(registros::table)
            .filter(registros::id.eq(registro.id().as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(query_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: &RegistroId) -> Result<bool, RegistroRepositoryError> {
        let mut conn = self.connection().await?;
        let affected = diesel::delete(registros::table.filter(registros::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(query_error)?;
        Ok(affected > 0)
    }

    async fn list_by_user(&self, user: &UserId) -> Result<Vec<Registro>, RegistroRepositoryError> {
        let mut conn = self.connection().await?;
        let rows: Vec<RegistroRow> = registros::table
            .filter(registros::user_id.eq(user.as_uuid()))
            .order((registros::created_at.asc(), registros::id.asc()))
            .select(RegistroRow::as_select())
            .load(&mut conn)
            .await
            .map_err(query_error)?;
        rows_to_registros(rows)
    }
}
