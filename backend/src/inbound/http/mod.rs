//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod registros;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod token_config;

pub use error::ApiResult;
