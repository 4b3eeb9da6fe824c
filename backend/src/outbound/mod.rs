//! Outbound adapters implementing the domain ports.
//!
//! - **auth**: static bearer token verification
//! - **memory**: process-local stores used without a database
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **seed**: user directory seed files

pub mod auth;
pub mod memory;
pub mod persistence;
pub mod seed;
