//! Full application assembly over in-memory stores for integration tests.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::DefaultClock;
use registros::domain::{RegistroService, User};
use registros::inbound::http::error::json_error_handler;
use registros::inbound::http::health::{HealthState, live, ready};
use registros::inbound::http::registros::{
    create_registro, delete_registro, get_registro, list_registros, list_registros_for_user,
    update_registro,
};
use registros::inbound::http::state::HttpState;
use registros::outbound::auth::StaticTokenVerifier;
use registros::outbound::memory::{InMemoryRegistroRepository, InMemoryUserRepository};
use registros::{BearerAuth, Trace};

pub const API_TOKEN: &str = "integration-token";
pub const ANA_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
pub const ANA_NAME: &str = "Professora Ana";
pub const UNKNOWN_USER_ID: &str = "00000000-0000-4000-8000-000000000000";

/// Bearer header value accepted by [`build_app`].
pub fn bearer() -> String {
    format!("Bearer {API_TOKEN}")
}

/// Shared stores so a test can build several apps over the same data.
#[derive(Clone)]
pub struct Stores {
    pub registros: Arc<InMemoryRegistroRepository>,
    pub users: Arc<InMemoryUserRepository>,
}

impl Stores {
    /// Stores seeded with a single user, Ana.
    pub fn seeded() -> Self {
        let ana = User::try_from_strings(ANA_ID, ANA_NAME).expect("valid user");
        Self {
            registros: Arc::new(InMemoryRegistroRepository::default()),
            users: Arc::new(InMemoryUserRepository::with_users([ana])),
        }
    }
}

pub fn build_app(
    stores: Stores,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let service = RegistroService::new(
        stores.registros,
        stores.users,
        Arc::new(DefaultClock),
    );
    let health = web::Data::new(HealthState::new());
    health.mark_ready();

    App::new()
        .app_data(health)
        .app_data(web::Data::new(HttpState::from_service(Arc::new(service))))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(BearerAuth::new(Arc::new(StaticTokenVerifier::from_tokens([
                    API_TOKEN,
                ]))))
                .service(list_registros)
                .service(list_registros_for_user)
                .service(get_registro)
                .service(create_registro)
                .service(update_registro)
                .service(delete_registro),
        )
        .service(ready)
        .service(live)
}
