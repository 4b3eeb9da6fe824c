//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use actix_web::{App, HttpResponse, ResponseError, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found("Registro não encontrado"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn assert_error_response(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Value {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set by error_response")
                .to_str()
                .expect("trace-id is valid UTF-8");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should not be present"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("error JSON deserialisation succeeds")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_echo_the_raw_message(expected_trace_id: String) {
    let error = Error::internal("registro repository query failed: relation missing")
        .with_trace_id(expected_trace_id.clone());

    let payload = assert_error_response(
        error,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;

    assert_eq!(
        payload,
        json!({
            "code": "internal_error",
            "message": "registro repository query failed: relation missing",
            "traceId": TRACE_ID,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_details(expected_trace_id: String) {
    let error = Error::invalid_request("nomeAluno is required")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"field": "nomeAluno"}));

    let payload =
        assert_error_response(error, StatusCode::BAD_REQUEST, Some(expected_trace_id.as_str()))
            .await;

    assert_eq!(payload["code"], "invalid_request");
    assert_eq!(payload["details"], json!({"field": "nomeAluno"}));
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::not_found("Usuário não encontrado");

    let payload = assert_error_response(error, StatusCode::NOT_FOUND, None).await;
    assert_eq!(
        payload,
        json!({"code": "not_found", "message": "Usuário não encontrado"})
    );
}

#[rstest]
fn from_actix_error_is_internal_error() {
    let actix_err = actix_web::error::ErrorBadRequest("boom");
    let err: Error = actix_err.into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "boom");
    assert_eq!(err.details(), None);
}

#[rstest]
#[actix_web::test]
async fn malformed_json_body_is_invalid_request() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route(
                "/",
                web::post().to(|_: web::Json<Value>| async { HttpResponse::Ok().finish() }),
            ),
    )
    .await;
    let req = actix_test::TestRequest::post()
        .uri("/")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();

    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}
