//! Registros server entry-point: loads settings, resolves API tokens, selects
//! the store and starts the HTTP server.

mod server;

use std::sync::Arc;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use registros::inbound::http::health::HealthState;
use registros::inbound::http::token_config::{
    BuildMode, TokenSources, api_tokens_from_sources,
};
use registros::outbound::auth::StaticTokenVerifier;
use registros::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use registros::outbound::seed::load_user_seed;
use server::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;

    let tokens = api_tokens_from_sources(
        TokenSources {
            token: settings.api_token.as_deref(),
            token_file: settings.api_token_file.as_deref(),
            allow_ephemeral: settings.allow_ephemeral_token,
        },
        BuildMode::from_debug_assertions(),
    )
    .map_err(std::io::Error::other)?;
    for fingerprint in tokens.fingerprints() {
        info!(%fingerprint, ephemeral = tokens.is_ephemeral(), "API token accepted");
    }
    let verifier = Arc::new(StaticTokenVerifier::from_tokens(tokens.iter()));

    let seed_users = match settings.users_file.as_deref() {
        Some(path) => load_user_seed(path).map_err(std::io::Error::other)?,
        None => Vec::new(),
    };

    let mut config = ServerConfig::new(settings.bind_addr(), verifier);
    if let Some(database_url) = settings.database_url() {
        run_pending_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.pool_max_size()),
        )
        .await
        .map_err(std::io::Error::other)?;
        let seeded = DieselUserRepository::new(pool.clone())
            .upsert_users(&seed_users)
            .await
            .map_err(std::io::Error::other)?;
        if seeded > 0 {
            info!(count = seeded, "user directory seeded");
        }
        config = config.with_db_pool(pool);
    } else {
        config = config.with_seed_users(seed_users);
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(initialize_metrics(|| {
        PrometheusMetricsBuilder::new("registros")
            .endpoint("/metrics")
            .build()
    }));

    let health_state = web::Data::new(HealthState::new());
    info!(bind_addr = %settings.bind_addr(), "starting registros server");
    create_server(health_state, config)?.await
}

/// Build Prometheus middleware, logging and continuing without metrics on
/// failure.
#[cfg(feature = "metrics")]
fn initialize_metrics<F, E>(build: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> Result<PrometheusMetrics, E>,
    E: std::fmt::Display,
{
    match build() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "failed to initialise Prometheus metrics; continuing without");
            None
        }
    }
}
