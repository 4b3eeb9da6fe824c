//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `REGISTROS_*` environment variables and
//! configuration files, in that order of precedence.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED),
    8080,
);
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Runtime configuration for the registros server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REGISTROS")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL connection URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Inline API token.
    pub api_token: Option<String>,
    /// File holding API tokens, one per line.
    pub api_token_file: Option<PathBuf>,
    /// JSON file of users to seed into the user directory.
    pub users_file: Option<PathBuf>,
    /// Permit a generated API token (debug builds only).
    #[ortho_config(default = false)]
    pub allow_ephemeral_token: bool,
}

impl AppSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Database URL with blank values treated as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }
}
