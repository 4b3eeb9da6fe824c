//! In-memory `UserRepository`.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId};

/// User directory backed by a lock-guarded map.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Seed the directory with `users`.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let store = users
            .into_iter()
            .map(|user| (user.id().clone(), user))
            .collect();
        Self {
            store: RwLock::new(store),
        }
    }

    /// Add or replace a user.
    pub fn insert_user(&self, user: User) -> Result<(), UserPersistenceError> {
        let mut guard = self
            .store
            .write()
            .map_err(|_| UserPersistenceError::query("user store poisoned"))?;
        guard.insert(user.id().clone(), user);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let guard = self
            .store
            .read()
            .map_err(|_| UserPersistenceError::query("user store poisoned"))?;
        Ok(guard.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        let guard = self
            .store
            .read()
            .map_err(|_| UserPersistenceError::query("user store poisoned"))?;
        Ok(ids.iter().filter_map(|id| guard.get(id).cloned()).collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the in-memory user directory.
    use super::*;
    use rstest::rstest;

    const ANA: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
    const BRUNO: &str = "9b2f5e1c-0d4a-4f6e-8a3b-7c1d2e3f4a5b";

    fn user(id: &str, name: &str) -> User {
        User::try_from_strings(id, name).expect("valid user")
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_ids_skips_unknown_users() {
        let repo = InMemoryUserRepository::with_users([user(ANA, "Ana")]);
        let ids = [
            UserId::new(ANA).expect("valid id"),
            UserId::new(BRUNO).expect("valid id"),
        ];
        let found = repo.find_by_ids(&ids).await.expect("lookup");
        assert_eq!(found, vec![user(ANA, "Ana")]);
    }

    #[rstest]
    #[tokio::test]
    async fn insert_user_makes_user_findable() {
        let repo = InMemoryUserRepository::default();
        let id = UserId::new(BRUNO).expect("valid id");
        assert_eq!(repo.find_by_id(&id).await.expect("lookup"), None);

        repo.insert_user(user(BRUNO, "Bruno")).expect("insert");
        assert_eq!(
            repo.find_by_id(&id).await.expect("lookup"),
            Some(user(BRUNO, "Bruno"))
        );
    }
}
