//! PostgreSQL persistence adapters using Diesel with `diesel-async` and bb8
//! pooling.
//!
//! Row structs and table definitions stay private to this module; adapters
//! translate between them and domain types only.
//!
//! ```ignore
//! use registros::outbound::persistence::{DbPool, DieselRegistroRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/registros")).await?;
//! let registros = DieselRegistroRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_registro_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_registro_repository::DieselRegistroRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
