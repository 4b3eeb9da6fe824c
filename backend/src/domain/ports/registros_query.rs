//! Driving port for registro read operations.
//!
//! Inbound adapters use this port to read registros without depending on
//! repository details.

use async_trait::async_trait;

use crate::domain::{Error, Registro, RegistroId, User, UserId};

/// Registro with its owner reference resolved to the user document.
///
/// `user` is `None` when the registro has no owner or the owner no longer
/// exists.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRegistro {
    pub registro: Registro,
    pub user: Option<User>,
}

/// Driving port for registro read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrosQuery: Send + Sync {
    /// List every registro with owners resolved.
    async fn list_registros(&self) -> Result<Vec<ResolvedRegistro>, Error>;

    /// Fetch one registro with its owner resolved.
    ///
    /// Fails with `not_found` when the id does not resolve.
    async fn get_registro(&self, id: &RegistroId) -> Result<ResolvedRegistro, Error>;

    /// List the registros referencing a user, owners left unresolved.
    ///
    /// Fails with `not_found` when the user does not exist.
    async fn list_registros_for_user(&self, user: &UserId) -> Result<Vec<Registro>, Error>;
}
