//! Registro HTTP handlers.
//!
//! ```text
//! GET    /api/v1/registros
//! GET    /api/v1/registros/{id}
//! POST   /api/v1/registros {"nomeAluno":"Ana","user":"3fa85f64-..."}
//! PUT    /api/v1/registros/{id} {"resumoAula":"Frações"}
//! DELETE /api/v1/registros/{id}
//! GET    /api/v1/registros/user/{userId}
//! ```
//!
//! Bodies are schema-less JSON objects: every key other than the reserved ones
//! is stored and echoed verbatim. Malformed path identifiers surface as
//! `internal_error`, matching other store-level failures.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::ports::ResolvedRegistro;
use crate::domain::{
    Error, Registro, RegistroBody, RegistroId, RegistroIdError, User, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, RegistroBodySchema, RegistroSchema};
use crate::inbound::http::state::HttpState;

/// Confirmation returned by `DELETE /api/v1/registros/{id}`.
pub const REGISTRO_DELETED: &str = "Registro deletado";

/// Plain message response body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Registro deletado")]
    pub message: String,
}

/// Owner reference as rendered in a registro response.
///
/// Resolved responses embed the user document; raw responses carry the bare
/// identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OwnerBody {
    Id(String),
    User(User),
}

/// Registro response body.
///
/// `user` serialises as `null` when the registro has no owner or the owner
/// could not be resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistroResponse {
    pub id: String,
    pub user: Option<OwnerBody>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    pub created_at: String,
    pub updated_at: String,
}

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl RegistroResponse {
    fn build(registro: &Registro, user: Option<OwnerBody>) -> Self {
        Self {
            id: registro.id().to_string(),
            user,
            fields: registro.fields().as_map().clone(),
            created_at: timestamp(registro.created_at()),
            updated_at: timestamp(registro.updated_at()),
        }
    }

    /// Render a registro with its owner reference as a bare identifier.
    pub fn raw(registro: &Registro) -> Self {
        let user = registro.user().map(|id| OwnerBody::Id(id.to_string()));
        Self::build(registro, user)
    }

    /// Render a registro with its owner embedded.
    pub fn resolved(entry: ResolvedRegistro) -> Self {
        let ResolvedRegistro { registro, user } = entry;
        Self::build(&registro, user.map(OwnerBody::User))
    }
}

fn parse_registro_id(raw: &str) -> Result<RegistroId, Error> {
    raw.parse()
        .map_err(|err: RegistroIdError| Error::internal(err.to_string()))
}

fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err| Error::internal(format!("invalid user id \"{raw}\": {err}")))
}

fn parse_body(payload: Value) -> Result<RegistroBody, Error> {
    RegistroBody::from_value(payload).map_err(|err| Error::invalid_request(err.to_string()))
}

/// List every registro with its owner resolved.
#[utoipa::path(
    get,
    path = "/api/v1/registros",
    responses(
        (status = 200, description = "All registros in creation order", body = [RegistroSchema]),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["registros"],
    operation_id = "listRegistros"
)]
#[get("/registros")]
pub async fn list_registros(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<RegistroResponse>>> {
    let registros = state.registros.list_registros().await?;
    Ok(web::Json(
        registros
            .into_iter()
            .map(RegistroResponse::resolved)
            .collect(),
    ))
}

/// Fetch one registro with its owner resolved.
#[utoipa::path(
    get,
    path = "/api/v1/registros/{id}",
    params(("id" = String, Path, description = "Registro identifier")),
    responses(
        (status = 200, description = "Registro", body = RegistroSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 404, description = "Registro não encontrado", body = ErrorSchema),
        (status = 500, description = "Malformed id or store failure", body = ErrorSchema)
    ),
    tags = ["registros"],
    operation_id = "getRegistro"
)]
#[get("/registros/{id}")]
pub async fn get_registro(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<RegistroResponse>> {
    let id = parse_registro_id(&path)?;
    let entry = state.registros.get_registro(&id).await?;
    Ok(web::Json(RegistroResponse::resolved(entry)))
}

/// Create a registro.
///
/// `nomeAluno` and `user` are required; every other key is stored as sent.
#[utoipa::path(
    post,
    path = "/api/v1/registros",
    request_body = RegistroBodySchema,
    responses(
        (status = 201, description = "Registro created", body = RegistroSchema),
        (status = 400, description = "Invalid body", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema)
    ),
    tags = ["registros"],
    operation_id = "createRegistro"
)]
#[post("/registros")]
pub async fn create_registro(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let body = parse_body(payload.into_inner())?;
    let created = state.registros_command.create_registro(body).await?;
    Ok(HttpResponse::Created().json(RegistroResponse::raw(&created)))
}

/// Merge the supplied fields into a registro.
#[utoipa::path(
    put,
    path = "/api/v1/registros/{id}",
    params(("id" = String, Path, description = "Registro identifier")),
    request_body = RegistroBodySchema,
    responses(
        (status = 200, description = "Updated registro", body = RegistroSchema),
        (status = 400, description = "Body is not a JSON object", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 404, description = "Registro não encontrado", body = ErrorSchema),
        (status = 500, description = "Malformed id or store failure", body = ErrorSchema)
    ),
    tags = ["registros"],
    operation_id = "updateRegistro"
)]
#[put("/registros/{id}")]
pub async fn update_registro(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<RegistroResponse>> {
    let id = parse_registro_id(&path)?;
    let body = parse_body(payload.into_inner())?;
    let updated = state.registros_command.update_registro(&id, body).await?;
    Ok(web::Json(RegistroResponse::raw(&updated)))
}

/// Delete a registro. Succeeds whether or not it existed.
#[utoipa::path(
    delete,
    path = "/api/v1/registros/{id}",
    params(("id" = String, Path, description = "Registro identifier")),
    responses(
        (status = 200, description = "Registro deletado", body = MessageResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 500, description = "Malformed id or store failure", body = ErrorSchema)
    ),
    tags = ["registros"],
    operation_id = "deleteRegistro"
)]
#[delete("/registros/{id}")]
pub async fn delete_registro(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_registro_id(&path)?;
    state.registros_command.delete_registro(&id).await?;
    Ok(web::Json(MessageResponse {
        message: REGISTRO_DELETED.to_owned(),
    }))
}

/// List the registros owned by a user, owners left as bare identifiers.
#[utoipa::path(
    get,
    path = "/api/v1/registros/user/{user_id}",
    params(("user_id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Registros of the user", body = [RegistroSchema]),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 404, description = "Usuário não encontrado", body = ErrorSchema),
        (status = 500, description = "Malformed id or store failure", body = ErrorSchema)
    ),
    tags = ["registros"],
    operation_id = "listRegistrosForUser"
)]
#[get("/registros/user/{user_id}")]
pub async fn list_registros_for_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<RegistroResponse>>> {
    let user = parse_user_id(&path)?;
    let registros = state.registros.list_registros_for_user(&user).await?;
    Ok(web::Json(registros.iter().map(RegistroResponse::raw).collect()))
}

#[cfg(test)]
#[path = "registros_tests.rs"]
mod tests;
