//! Port for registro persistence.

use async_trait::async_trait;

use crate::domain::{Registro, RegistroId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by registro repository adapters.
    pub enum RegistroRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "registro repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "registro repository query failed: {message}",
    }
}

/// Port for storing and reading registros.
///
/// Listing operations return registros in creation order (`created_at`,
/// then id).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistroRepository: Send + Sync {
    /// Load every registro.
    async fn list_all(&self) -> Result<Vec<Registro>, RegistroRepositoryError>;

    /// Find a registro by id.
    async fn find_by_id(&self, id: &RegistroId)
    -> Result<Option<Registro>, RegistroRepositoryError>;

    /// Persist a new registro.
    async fn insert(&self, registro: &Registro) -> Result<(), RegistroRepositoryError>;

    /// Overwrite an existing registro.
    ///
    /// Returns `false` when no registro with that id exists.
    async fn update(&self, registro: &Registro) -> Result<bool, RegistroRepositoryError>;

    /// Remove a registro.
    ///
    /// Returns whether a registro was removed.
    async fn delete(&self, id: &RegistroId) -> Result<bool, RegistroRepositoryError>;

    /// Load the registros referencing a user.
    async fn list_by_user(&self, user: &UserId)
    -> Result<Vec<Registro>, RegistroRepositoryError>;
}
