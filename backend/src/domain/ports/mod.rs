//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod registro_repository;
mod registros_command;
mod registros_query;
mod token_verifier;
mod user_repository;

#[cfg(test)]
pub use registro_repository::MockRegistroRepository;
pub use registro_repository::{RegistroRepository, RegistroRepositoryError};
#[cfg(test)]
pub use registros_command::MockRegistrosCommand;
pub use registros_command::RegistrosCommand;
#[cfg(test)]
pub use registros_query::MockRegistrosQuery;
pub use registros_query::{RegistrosQuery, ResolvedRegistro};
#[cfg(test)]
pub use token_verifier::MockTokenVerifier;
pub use token_verifier::{TokenVerifier, TokenVerifierError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
