//! Registro domain service.
//!
//! Implements the registro driving ports on top of the registro and user
//! repositories. Absence of a registro or user surfaces as `not_found`;
//! repository failures surface as `internal_error` carrying the adapter
//! message verbatim.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{
    RegistroRepository, RegistroRepositoryError, RegistrosCommand, RegistrosQuery,
    ResolvedRegistro, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Error, Registro, RegistroBody, RegistroId, RegistroValidationError, User, UserId,
};

/// Message returned when a registro id does not resolve.
pub const REGISTRO_NOT_FOUND: &str = "Registro não encontrado";
/// Message returned when a user id does not resolve.
pub const USER_NOT_FOUND: &str = "Usuário não encontrado";

fn map_repository_error(error: RegistroRepositoryError) -> Error {
    Error::internal(error.to_string())
}

fn map_user_error(error: UserPersistenceError) -> Error {
    Error::internal(error.to_string())
}

fn invalid_body(error: &RegistroValidationError) -> Error {
    let err = Error::invalid_request(error.to_string());
    match error.field() {
        Some(field) => err.with_details(serde_json::json!({ "field": field })),
        None => err,
    }
}

/// Registro service implementing the query and command driving ports.
#[derive(Clone)]
pub struct RegistroService<R, U> {
    registros: Arc<R>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<R, U> RegistroService<R, U> {
    /// Create a service over the given repositories and clock.
    pub fn new(registros: Arc<R>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            registros,
            users,
            clock,
        }
    }
}

impl<R, U> RegistroService<R, U>
where
    R: RegistroRepository,
    U: UserRepository,
{
    async fn resolve_owners(
        &self,
        registros: Vec<Registro>,
    ) -> Result<Vec<ResolvedRegistro>, Error> {
        let mut seen = HashSet::new();
        let owner_ids: Vec<UserId> = registros
            .iter()
            .filter_map(Registro::user)
            .filter(|id| seen.insert(*id))
            .cloned()
            .collect();

        let owners: HashMap<UserId, User> = if owner_ids.is_empty() {
            HashMap::new()
        } else {
            self.users
                .find_by_ids(&owner_ids)
                .await
                .map_err(map_user_error)?
                .into_iter()
                .map(|user| (user.id().clone(), user))
                .collect()
        };

        Ok(registros
            .into_iter()
            .map(|registro| {
                let user = registro.user().and_then(|id| owners.get(id).cloned());
                ResolvedRegistro { registro, user }
            })
            .collect())
    }

    async fn find_existing(&self, id: &RegistroId) -> Result<Registro, Error> {
        self.registros
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(REGISTRO_NOT_FOUND))
    }
}

#[async_trait]
impl<R, U> RegistrosQuery for RegistroService<R, U>
where
    R: RegistroRepository,
    U: UserRepository,
{
    async fn list_registros(&self) -> Result<Vec<ResolvedRegistro>, Error> {
        let registros = self
            .registros
            .list_all()
            .await
            .map_err(map_repository_error)?;
        self.resolve_owners(registros).await
    }

    async fn get_registro(&self, id: &RegistroId) -> Result<ResolvedRegistro, Error> {
        let registro = self.find_existing(id).await?;
        let user = match registro.user() {
            Some(owner) => self.users.find_by_id(owner).await.map_err(map_user_error)?,
            None => None,
        };
        Ok(ResolvedRegistro { registro, user })
    }

    async fn list_registros_for_user(&self, user: &UserId) -> Result<Vec<Registro>, Error> {
        self.users
            .find_by_id(user)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))?;

        self.registros
            .list_by_user(user)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R, U> RegistrosCommand for RegistroService<R, U>
where
    R: RegistroRepository,
    U: UserRepository,
{
    async fn create_registro(&self, body: RegistroBody) -> Result<Registro, Error> {
        let draft = body.into_draft().map_err(|err| invalid_body(&err))?;
        let registro = Registro::create(draft, self.clock.utc());

        // Store rejections on create are reported as client errors.
        self.registros
            .insert(&registro)
            .await
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        Ok(registro)
    }

    async fn update_registro(
        &self,
        id: &RegistroId,
        body: RegistroBody,
    ) -> Result<Registro, Error> {
        let patch = body
            .into_patch()
            .map_err(|err| Error::internal(err.to_string()))?;
        let mut registro = self.find_existing(id).await?;
        registro.apply(patch, self.clock.utc());

        let updated = self
            .registros
            .update(&registro)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            return Err(Error::not_found(REGISTRO_NOT_FOUND));
        }
        Ok(registro)
    }

    async fn delete_registro(&self, id: &RegistroId) -> Result<(), Error> {
        let removed = self
            .registros
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            debug!(registro_id = %id, "delete requested for absent registro");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "registro_service_tests.rs"]
mod tests;
