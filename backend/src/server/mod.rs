//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
pub(crate) mod settings;
mod state_builders;

pub use config::ServerConfig;

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;
use state_builders::build_http_state;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use registros::ApiDoc;
use registros::domain::ports::TokenVerifier;
use registros::inbound::http::error::json_error_handler;
use registros::inbound::http::health::{HealthState, live, ready};
use registros::inbound::http::registros::{
    create_registro, delete_registro, get_registro, list_registros, list_registros_for_user,
    update_registro,
};
use registros::inbound::http::state::HttpState;
use registros::{BearerAuth, Trace};

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    verifier: Arc<dyn TokenVerifier>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        verifier,
    } = deps;

    // `/registros/user/{user_id}` must precede `/registros/{id}`.
    let api = web::scope("/api/v1")
        .wrap(BearerAuth::new(verifier))
        .service(list_registros)
        .service(list_registros_for_user)
        .service(get_registro)
        .service(create_registro)
        .service(update_registro)
        .service(delete_registro);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the HTTP server and mark it ready once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        verifier,
        db_pool,
        seed_users,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    let http_state = build_http_state(db_pool.as_ref(), seed_users);

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            verifier: verifier.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
