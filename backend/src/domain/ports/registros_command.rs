//! Driving port for registro mutations.

use async_trait::async_trait;

use crate::domain::{Error, Registro, RegistroBody, RegistroId};

/// Driving port for creating, updating, and deleting registros.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrosCommand: Send + Sync {
    /// Create a registro from a client body.
    ///
    /// Fails with `invalid_request` when the body is rejected.
    async fn create_registro(&self, body: RegistroBody) -> Result<Registro, Error>;

    /// Merge a partial body into an existing registro.
    ///
    /// Fails with `not_found` when the id does not resolve.
    async fn update_registro(&self, id: &RegistroId, body: RegistroBody)
    -> Result<Registro, Error>;

    /// Delete a registro.
    ///
    /// Succeeds whether or not the registro existed.
    async fn delete_registro(&self, id: &RegistroId) -> Result<(), Error>;
}
