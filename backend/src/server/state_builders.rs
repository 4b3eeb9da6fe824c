//! Builds handler state over the configured store.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::{info, warn};

use registros::domain::{RegistroService, User};
use registros::inbound::http::state::HttpState;
use registros::outbound::memory::{InMemoryRegistroRepository, InMemoryUserRepository};
use registros::outbound::persistence::{DbPool, DieselRegistroRepository, DieselUserRepository};

/// Wire the registro service over PostgreSQL when a pool is present, otherwise
/// over process-local stores holding `seed_users`.
pub(crate) fn build_http_state(
    db_pool: Option<&DbPool>,
    seed_users: Vec<User>,
) -> web::Data<HttpState> {
    let state = match db_pool {
        Some(pool) => HttpState::from_service(Arc::new(RegistroService::new(
            Arc::new(DieselRegistroRepository::new(pool.clone())),
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DefaultClock),
        ))),
        None => {
            warn!("no database configured; registros are kept in memory");
            if seed_users.is_empty() {
                warn!("no users seeded; owners resolve to null and user listings 404");
            } else {
                info!(count = seed_users.len(), "in-memory user directory seeded");
            }
            HttpState::from_service(Arc::new(RegistroService::new(
                Arc::new(InMemoryRegistroRepository::default()),
                Arc::new(InMemoryUserRepository::with_users(seed_users)),
                Arc::new(DefaultClock),
            )))
        }
    };
    web::Data::new(state)
}
