//! Behavioural tests for the registro resource.

#[path = "support/app.rs"]
mod app;

use std::cell::RefCell;

use actix_web::http::header::AUTHORIZATION;
use actix_web::rt::System;
use actix_web::test as actix_test;
use app::{ANA_ID, ANA_NAME, Stores, UNKNOWN_USER_ID, bearer, build_app};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

struct RegistrosWorld {
    stores: RefCell<Option<Stores>>,
    registro_id: RefCell<Option<String>>,
    last_status: RefCell<Option<u16>>,
    last_body: RefCell<Option<Value>>,
}

impl RegistrosWorld {
    fn new() -> Self {
        Self {
            stores: RefCell::new(None),
            registro_id: RefCell::new(None),
            last_status: RefCell::new(None),
            last_body: RefCell::new(None),
        }
    }

    fn registro_path(&self) -> String {
        let id = self.registro_id.borrow();
        format!(
            "/api/v1/registros/{}",
            id.as_deref().expect("registro created")
        )
    }

    fn perform(&self, req: actix_test::TestRequest) {
        let stores = self
            .stores
            .borrow()
            .clone()
            .expect("app started before requests");
        let (status, body) = System::new().block_on(async move {
            let app = actix_test::init_service(build_app(stores)).await;
            let res = actix_test::call_service(&app, req.to_request()).await;
            let status = res.status().as_u16();
            let bytes = actix_test::read_body(res).await;
            (status, serde_json::from_slice::<Value>(&bytes).ok())
        });
        *self.last_status.borrow_mut() = Some(status);
        *self.last_body.borrow_mut() = body;
    }

    fn with_body<R>(&self, f: impl FnOnce(&Value) -> R) -> R {
        let body = self.last_body.borrow();
        f(body.as_ref().expect("response body"))
    }
}

fn authed(req: actix_test::TestRequest) -> actix_test::TestRequest {
    req.insert_header((AUTHORIZATION, bearer()))
}

#[fixture]
fn world() -> RegistrosWorld {
    RegistrosWorld::new()
}

#[given("a running registros app with a seeded user")]
fn a_running_registros_app_with_a_seeded_user(world: &RegistrosWorld) {
    *world.stores.borrow_mut() = Some(Stores::seeded());
}

#[when("the client creates a registro for the seeded user")]
fn the_client_creates_a_registro_for_the_seeded_user(world: &RegistrosWorld) {
    world.perform(
        authed(actix_test::TestRequest::post().uri("/api/v1/registros")).set_json(json!({
            "nomeAluno": "Ana",
            "resumoAula": "Frações",
            "user": ANA_ID,
        })),
    );
    let id = world.with_body(|body| body["id"].as_str().map(str::to_owned));
    *world.registro_id.borrow_mut() = id;
}

#[when("the client fetches the created registro")]
fn the_client_fetches_the_created_registro(world: &RegistrosWorld) {
    world.perform(authed(actix_test::TestRequest::get().uri(&world.registro_path())));
}

#[when("the client renames the created registro to {name}")]
fn the_client_renames_the_created_registro(world: &RegistrosWorld, name: String) {
    world.perform(
        authed(actix_test::TestRequest::put().uri(&world.registro_path()))
            .set_json(json!({ "nomeAluno": name })),
    );
}

#[when("the client deletes the created registro")]
fn the_client_deletes_the_created_registro(world: &RegistrosWorld) {
    world.perform(authed(actix_test::TestRequest::delete().uri(&world.registro_path())));
}

#[when("the client lists registros for an unknown user")]
fn the_client_lists_registros_for_an_unknown_user(world: &RegistrosWorld) {
    world.perform(authed(
        actix_test::TestRequest::get().uri(&format!("/api/v1/registros/user/{UNKNOWN_USER_ID}")),
    ));
}

#[when("the client lists registros without a token")]
fn the_client_lists_registros_without_a_token(world: &RegistrosWorld) {
    world.perform(actix_test::TestRequest::get().uri("/api/v1/registros"));
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &RegistrosWorld, status: u16) {
    assert_eq!(*world.last_status.borrow(), Some(status));
}

#[then("the registro owner is resolved to the seeded user")]
fn the_registro_owner_is_resolved_to_the_seeded_user(world: &RegistrosWorld) {
    world.with_body(|body| {
        assert_eq!(body["user"]["id"], ANA_ID);
        assert_eq!(body["user"]["displayName"], ANA_NAME);
    });
}

#[then("the registro field {field} is {value}")]
fn the_registro_field_is(world: &RegistrosWorld, field: String, value: String) {
    world.with_body(|body| {
        assert_eq!(body[field.as_str()].as_str(), Some(value.as_str()));
    });
}

#[then("the response message is {message}")]
fn the_response_message_is(world: &RegistrosWorld, message: String) {
    world.with_body(|body| {
        assert_eq!(body["message"].as_str(), Some(message.as_str()));
    });
}

#[then("the error code is {code}")]
fn the_error_code_is(world: &RegistrosWorld, code: String) {
    world.with_body(|body| {
        assert_eq!(body["code"].as_str(), Some(code.as_str()));
    });
}

#[scenario(path = "tests/features/registros.feature", name = "Registro lifecycle")]
fn registro_lifecycle(world: RegistrosWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/registros.feature",
    name = "Listing registros for an unknown user"
)]
fn listing_registros_for_an_unknown_user(world: RegistrosWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/registros.feature",
    name = "Requests without a bearer token are rejected"
)]
fn requests_without_a_bearer_token_are_rejected(world: RegistrosWorld) {
    drop(world);
}
