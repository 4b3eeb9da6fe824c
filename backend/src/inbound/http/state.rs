//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{RegistrosCommand, RegistrosQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registros: Arc<dyn RegistrosQuery>,
    pub registros_command: Arc<dyn RegistrosCommand>,
}

impl HttpState {
    /// Construct state from explicit query and command ports.
    pub fn new(
        registros: Arc<dyn RegistrosQuery>,
        registros_command: Arc<dyn RegistrosCommand>,
    ) -> Self {
        Self {
            registros,
            registros_command,
        }
    }

    /// Construct state from a single service implementing both ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use registros::domain::RegistroService;
    /// use registros::inbound::http::state::HttpState;
    /// use registros::outbound::memory::{InMemoryRegistroRepository, InMemoryUserRepository};
    ///
    /// let service = RegistroService::new(
    ///     Arc::new(InMemoryRegistroRepository::default()),
    ///     Arc::new(InMemoryUserRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let state = HttpState::from_service(Arc::new(service));
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: RegistrosQuery + RegistrosCommand + 'static,
    {
        Self {
            registros: service.clone(),
            registros_command: service,
        }
    }
}
