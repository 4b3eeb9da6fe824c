//! Process-local adapters used when no database is configured.
//!
//! Data lives for the lifetime of the process only.

mod registro_repository;
mod user_repository;

pub use registro_repository::InMemoryRegistroRepository;
pub use user_repository::InMemoryUserRepository;
