//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! Registro bodies are schema-less; the wrappers below document the
//! well-known keys only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The bearer token is missing or rejected.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The requested registro or user does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// Store failure or malformed identifier; the raw message is echoed.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Registro não encontrado")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Stable user identifier.
    #[schema(format = "uuid", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Display name.
    #[schema(example = "Professora Ana")]
    display_name: String,
}

/// OpenAPI schema for [`crate::domain::Registro`] responses.
///
/// `user` is the bare owner identifier on create, update and list-by-user
/// responses, and the embedded user document on list and get.
#[derive(ToSchema)]
#[schema(as = crate::domain::Registro, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RegistroSchema {
    #[schema(format = "uuid")]
    id: String,
    /// Owner identifier or embedded user; `null` when unresolved.
    #[schema(value_type = Option<Object>)]
    user: Option<serde_json::Value>,
    #[schema(example = "Ana")]
    nome_aluno: Option<String>,
    #[schema(example = "Frações com material concreto")]
    resumo_aula: Option<String>,
    #[schema(example = "Sala 3")]
    localizacao: Option<String>,
    #[schema(example = "https://example.org/fotos/aula-1.jpg")]
    foto_aula: Option<String>,
    #[schema(format = "date-time")]
    created_at: String,
    #[schema(format = "date-time")]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::RegistroBody`] requests.
///
/// Any additional keys are stored verbatim.
#[derive(ToSchema)]
#[schema(as = crate::domain::RegistroBody, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RegistroBodySchema {
    /// Required on create.
    #[schema(format = "uuid")]
    user: Option<String>,
    /// Required on create.
    nome_aluno: Option<String>,
    resumo_aula: Option<String>,
    localizacao: Option<String>,
    foto_aula: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_code_schema_lists_every_code() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        assert_eq!(ErrorCodeSchema::name(), "crate.domain.ErrorCode");
        for code in ["invalid_request", "unauthorized", "not_found", "internal_error"] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn error_schema_uses_camel_case_trace_id() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json.contains("traceId"));
        assert!(!schema_json.contains("trace_id"));
    }

    #[test]
    fn registro_schema_documents_well_known_fields() {
        let schema_json = schema_to_json::<RegistroSchema>();
        assert_eq!(RegistroSchema::name(), "crate.domain.Registro");
        for field in [
            "nomeAluno",
            "resumoAula",
            "localizacao",
            "fotoAula",
            "createdAt",
            "updatedAt",
        ] {
            assert!(schema_json.contains(field), "missing {field}");
        }
    }

    #[test]
    fn user_schema_has_expected_name() {
        let schema_json = schema_to_json::<UserSchema>();
        assert_eq!(UserSchema::name(), "crate.domain.User");
        assert!(schema_json.contains("displayName"));
    }
}
