//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the registro and health endpoints, the schema
//! wrappers from [`crate::inbound::http::schemas`], and the bearer token
//! security scheme. Swagger UI serves it in debug builds; the `openapi-dump`
//! binary prints it for external tooling.

use crate::inbound::http::registros::MessageResponse;
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, RegistroBodySchema, RegistroSchema, UserSchema,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer token security scheme.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Adds the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("API token sent as `Authorization: Bearer <token>`."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Registros API",
        description = "CRUD interface for classroom activity registros and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::registros::list_registros,
        crate::inbound::http::registros::get_registro,
        crate::inbound::http::registros::create_registro,
        crate::inbound::http::registros::update_registro,
        crate::inbound::http::registros::delete_registro,
        crate::inbound::http::registros::list_registros_for_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RegistroSchema,
        RegistroBodySchema,
        UserSchema,
        ErrorSchema,
        ErrorCodeSchema,
        MessageResponse
    )),
    tags(
        (name = "registros", description = "Registro records and their owners"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const REGISTRO_SCHEMA_NAME: &str = "crate.domain.Registro";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case(ERROR_SCHEMA_NAME, "code")]
    #[case(ERROR_SCHEMA_NAME, "traceId")]
    #[case(REGISTRO_SCHEMA_NAME, "nomeAluno")]
    #[case(REGISTRO_SCHEMA_NAME, "user")]
    fn schemas_expose_fields(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let found = schemas.get(schema).expect("schema registered");
        assert_object_schema_has_field(found, field);
    }

    #[rstest]
    fn registro_routes_are_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/registros",
            "/api/v1/registros/{id}",
            "/api/v1/registros/user/{user_id}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }
}
