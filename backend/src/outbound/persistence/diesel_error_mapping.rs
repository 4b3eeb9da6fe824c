//! Diesel and pool error translation shared by the repository adapters.
//!
//! Messages are carried through to the port errors unchanged so the service
//! layer can echo them to clients.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure onto a port's connection error constructor.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    debug!(%error, "connection checkout failed");
    connection(error.to_string())
}

/// Map a Diesel failure onto a port's query or connection constructor.
///
/// Closed connections map to `connection`; everything else maps to `query`.
pub(crate) fn map_diesel_error<E>(
    error: DieselError,
    query: impl FnOnce(String) -> E,
    connection: impl FnOnce(String) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => query(info.message().to_owned()),
        other => query(other.to_string()),
    }
}
