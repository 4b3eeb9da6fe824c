//! In-memory `RegistroRepository`.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{RegistroRepository, RegistroRepositoryError};
use crate::domain::{Registro, RegistroId, UserId};

/// Registro store backed by a lock-guarded map.
#[derive(Default)]
pub struct InMemoryRegistroRepository {
    store: RwLock<HashMap<RegistroId, Registro>>,
}

impl InMemoryRegistroRepository {
    fn read(
        &self,
    ) -> Result<RwLockReadGuard<'_, HashMap<RegistroId, Registro>>, RegistroRepositoryError> {
        self.store
            .read()
            .map_err(|_| RegistroRepositoryError::query("registro store poisoned"))
    }

    fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<RegistroId, Registro>>, RegistroRepositoryError> {
        self.store
            .write()
            .map_err(|_| RegistroRepositoryError::query("registro store poisoned"))
    }

    fn sorted<'a>(registros: impl Iterator<Item = &'a Registro>) -> Vec<Registro> {
        let mut out: Vec<Registro> = registros.cloned().collect();
        out.sort_by_key(|registro| (registro.created_at(), registro.id()));
        out
    }
}

#[async_trait]
impl RegistroRepository for InMemoryRegistroRepository {
    async fn list_all(&self) -> Result<Vec<Registro>, RegistroRepositoryError> {
        let guard = self.read()?;
        Ok(Self::sorted(guard.values()))
    }

    async fn find_by_id(
        &self,
        id: &RegistroId,
    ) -> Result<Option<Registro>, RegistroRepositoryError> {
        let guard = self.read()?;
        Ok(guard.get(id).cloned())
    }

    async fn insert(&self, registro: &Registro) -> Result<(), RegistroRepositoryError> {
        let mut guard = self.write()?;
        if guard.contains_key(&registro.id()) {
            return Err(RegistroRepositoryError::query(format!(
                "registro {} already exists",
                registro.id()
            )));
        }
        guard.insert(registro.id(), registro.clone());
        Ok(())
    }

    async fn update(&self, registro: &Registro) -> Result<bool, RegistroRepositoryError> {
        let mut guard = self.write()?;
        match guard.get_mut(&registro.id()) {
            Some(slot) => {
                *slot = registro.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &RegistroId) -> Result<bool, RegistroRepositoryError> {
        let mut guard = self.write()?;
        Ok(guard.remove(id).is_some())
    }

    async fn list_by_user(&self, user: &UserId) -> Result<Vec<Registro>, RegistroRepositoryError> {
        let guard = self.read()?;
        Ok(Self::sorted(
            guard
                .values()
                .filter(|registro| registro.user() == Some(user)),
        ))
    }
}
