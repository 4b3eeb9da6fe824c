//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use registros::domain::User;
use registros::domain::ports::TokenVerifier;
use registros::outbound::persistence::DbPool;

/// Builder-style configuration handed to [`super::create_server`].
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) verifier: Arc<dyn TokenVerifier>,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) seed_users: Vec<User>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Listen on `bind_addr`, authenticating API calls with `verifier`.
    ///
    /// Without a pool the server keeps registros in memory.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self {
            bind_addr,
            verifier,
            db_pool: None,
            seed_users: Vec::new(),
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Persist registros in PostgreSQL through `pool`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Preload the in-memory user directory. Ignored when a pool is set;
    /// the database is seeded before the server starts.
    #[must_use]
    pub fn with_seed_users(mut self, users: Vec<User>) -> Self {
        self.seed_users = users;
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
