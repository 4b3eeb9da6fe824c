//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types framework-agnostic and document invariants
//! and serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - User (alias to `user::User`) — referenced user identity and display name.
//! - Registro (alias to `registro::Registro`) — activity log entry aggregate.
//! - RegistroService — query and command use-cases over the repositories.

pub mod auth;
pub mod error;
pub mod ports;
pub mod registro;
pub mod registro_service;
pub mod trace_id;
pub mod user;

pub use self::auth::{BearerToken, BearerTokenError};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::registro::{
    FOTO_AULA, LOCALIZACAO, NOME_ALUNO, RESUMO_AULA, Registro, RegistroBody, RegistroDraft,
    RegistroFields, RegistroId, RegistroIdError, RegistroPatch, RegistroValidationError, USER,
};
pub use self::registro_service::{REGISTRO_NOT_FOUND, RegistroService, USER_NOT_FOUND};
pub use self::trace_id::TraceId;
pub use self::user::{DISPLAY_NAME_MAX, DisplayName, User, UserId, UserValidationError};
