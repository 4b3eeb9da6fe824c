//! End-to-end HTTP tests for the registro resource over in-memory stores.

#[path = "support/app.rs"]
mod app;

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::test as actix_test;
use app::{ANA_ID, ANA_NAME, Stores, UNKNOWN_USER_ID, bearer, build_app};
use registros::domain::TRACE_ID_HEADER;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn stores() -> Stores {
    Stores::seeded()
}

fn authed(req: actix_test::TestRequest) -> actix_test::TestRequest {
    req.insert_header((AUTHORIZATION, bearer()))
}

#[rstest]
#[actix_web::test]
async fn registro_lifecycle(stores: Stores) {
    let app = actix_test::init_service(build_app(stores)).await;

    let res = actix_test::call_service(
        &app,
        authed(actix_test::TestRequest::post().uri("/api/v1/registros"))
            .set_json(json!({
                "nomeAluno": "Ana",
                "resumoAula": "Frações",
                "user": ANA_ID,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = actix_test::read_body_json(res).await;
    assert_eq!(created["user"], ANA_ID);
    let id = created["id"].as_str().expect("id").to_owned();

    let fetched: Value = actix_test::call_and_read_body_json(
        &app,
        authed(actix_test::TestRequest::get().uri(&format!("/api/v1/registros/{id}"))).to_request(),
    )
    .await;
    assert_eq!(fetched["user"]["displayName"], ANA_NAME);
    assert_eq!(fetched["nomeAluno"], "Ana");
    assert_eq!(fetched["createdAt"], created["createdAt"]);

    let updated: Value = actix_test::call_and_read_body_json(
        &app,
        authed(actix_test::TestRequest::put().uri(&format!("/api/v1/registros/{id}")))
            .set_json(json!({"nomeAluno": "Ana Maria"}))
            .to_request(),
    )
    .await;
    assert_eq!(updated["nomeAluno"], "Ana Maria");
    assert_eq!(updated["resumoAula"], "Frações");
    assert_eq!(updated["user"], ANA_ID);

    let deleted: Value = actix_test::call_and_read_body_json(
        &app,
        authed(actix_test::TestRequest::delete().uri(&format!("/api/v1/registros/{id}")))
            .to_request(),
    )
    .await;
    assert_eq!(deleted, json!({"message": "Registro deletado"}));

    let res = actix_test::call_service(
        &app,
        authed(actix_test::TestRequest::get().uri(&format!("/api/v1/registros/{id}"))).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "Registro não encontrado");
}

#[rstest]
#[actix_web::test]
async fn deleting_unknown_registro_still_succeeds(stores: Stores) {
    let app = actix_test::init_service(build_app(stores)).await;

    let res = actix_test::call_service(
        &app,
        authed(actix_test::TestRequest::delete().uri("/api/v1/registros/7d9f3c1e-2b4a-4c8d-9e6f-1a2b3c4d5e6f"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn list_by_user_returns_only_their_registros(stores: Stores) {
    let app = actix_test::init_service(build_app(stores)).await;
    for (name, user) in [("Ana", ANA_ID), ("Bruno", UNKNOWN_USER_ID)] {
        let res = actix_test::call_service(
            &app,
            authed(actix_test::TestRequest::post().uri("/api/v1/registros"))
                .set_json(json!({"nomeAluno": name, "user": user}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let listed: Value = actix_test::call_and_read_body_json(
        &app,
        authed(actix_test::TestRequest::get().uri(&format!("/api/v1/registros/user/{ANA_ID}")))
            .to_request(),
    )
    .await;
    let listed = listed.as_array().expect("array body");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["nomeAluno"], "Ana");
    assert_eq!(listed[0]["user"], ANA_ID);

    let all: Value = actix_test::call_and_read_body_json(
        &app,
        authed(actix_test::TestRequest::get().uri("/api/v1/registros")).to_request(),
    )
    .await;
    let all = all.as_array().expect("array body");
    assert_eq!(all.len(), 2);
    let owner_of = |name: &str| {
        all.iter()
            .find(|entry| entry["nomeAluno"] == name)
            .map(|entry| entry["user"].clone())
            .expect("registro listed")
    };
    assert_eq!(owner_of("Ana")["id"], ANA_ID);
    assert_eq!(owner_of("Bruno"), Value::Null);
}

#[rstest]
#[actix_web::test]
async fn list_by_unknown_user_is_not_found(stores: Stores) {
    let app = actix_test::init_service(build_app(stores)).await;

    let res = actix_test::call_service(
        &app,
        authed(actix_test::TestRequest::get().uri(&format!("/api/v1/registros/user/{UNKNOWN_USER_ID}")))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "Usuário não encontrado");
}

#[rstest]
#[case(json!({"user": ANA_ID}), "nomeAluno")]
#[case(json!({"nomeAluno": "Ana"}), "user")]
#[case(json!({"nomeAluno": "", "user": ANA_ID}), "nomeAluno")]
#[actix_web::test]
async fn create_reports_missing_field(
    stores: Stores,
    #[case] payload: Value,
    #[case] field: &str,
) {
    let app = actix_test::init_service(build_app(stores)).await;

    let res = actix_test::call_service(
        &app,
        authed(actix_test::TestRequest::post().uri("/api/v1/registros"))
            .set_json(payload)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
}

#[rstest]
#[case(None)]
#[case(Some("Bearer wrong"))]
#[case(Some("Basic aW50ZWdyYXRpb24="))]
#[actix_web::test]
async fn api_rejects_missing_or_invalid_tokens(stores: Stores, #[case] header: Option<&str>) {
    let app = actix_test::init_service(build_app(stores)).await;

    let mut req = actix_test::TestRequest::get().uri("/api/v1/registros");
    if let Some(value) = header {
        req = req.insert_header((AUTHORIZATION, value));
    }
    let res = actix_test::call_service(&app, req.to_request()).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let trace_id = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["traceId"], trace_id);
}

#[rstest]
#[actix_web::test]
async fn health_probes_need_no_token(stores: Stores) {
    let app = actix_test::init_service(build_app(stores)).await;

    for uri in ["/health/ready", "/health/live"] {
        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK, "{uri}");
    }
}

#[rstest]
#[actix_web::test]
async fn owner_ids_match_regardless_of_spelling(stores: Stores) {
    let app = actix_test::init_service(build_app(stores)).await;

    let res = actix_test::call_service(
        &app,
        authed(actix_test::TestRequest::post().uri("/api/v1/registros"))
            .set_json(json!({"nomeAluno": "Ana", "user": ANA_ID.to_uppercase()}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = actix_test::read_body_json(res).await;
    assert_eq!(created["user"], ANA_ID);
    let id = created["id"].as_str().expect("id").to_owned();

    let fetched: Value = actix_test::call_and_read_body_json(
        &app,
        authed(actix_test::TestRequest::get().uri(&format!("/api/v1/registros/{id}")))
            .to_request(),
    )
    .await;
    assert_eq!(fetched["user"]["displayName"], ANA_NAME);

    let listed: Value = actix_test::call_and_read_body_json(
        &app,
        authed(actix_test::TestRequest::get().uri(&format!("/api/v1/registros/user/{ANA_ID}")))
            .to_request(),
    )
    .await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}
