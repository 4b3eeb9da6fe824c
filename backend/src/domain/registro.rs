//! Registro aggregate: a classroom activity log entry owned by a user.
//!
//! A registro is schema-less apart from its identity, its owner reference,
//! and audit timestamps. Descriptive fields (`nomeAluno`, `resumoAula`,
//! `localizacao`, `fotoAula`, and anything else a client sends) are kept as
//! JSON values and validated only for presence where required.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::UserId;

/// Student name field.
pub const NOME_ALUNO: &str = "nomeAluno";
/// Lesson summary field.
pub const RESUMO_AULA: &str = "resumoAula";
/// Location field.
pub const LOCALIZACAO: &str = "localizacao";
/// Photo reference field.
pub const FOTO_AULA: &str = "fotoAula";
/// Owner reference field.
pub const USER: &str = "user";

/// Keys managed by the service; clients cannot write them as free fields.
const RESERVED_KEYS: [&str; 5] = ["id", "_id", USER, "createdAt", "updatedAt"];

/// Errors raised while validating registro input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistroValidationError {
    /// The body was not a JSON object.
    #[error("registro body must be a JSON object")]
    NotAnObject,
    /// A required field was absent, null, or an empty string.
    #[error("{field} is required")]
    MissingField { field: &'static str },
    /// The owner reference was not a user identifier.
    #[error("user must be a valid user id, got {value}")]
    InvalidUser { value: String },
}

impl RegistroValidationError {
    /// Name of the offending field, if the error concerns one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::NotAnObject => None,
            Self::MissingField { field } => Some(*field),
            Self::InvalidUser { .. } => Some(USER),
        }
    }
}

/// Error raised when a registro identifier cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid registro id \"{value}\": {reason}")]
pub struct RegistroIdError {
    value: String,
    reason: String,
}

/// Stable registro identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistroId(Uuid);

impl RegistroId {
    /// Generate a fresh identifier for a new registro.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RegistroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RegistroId {
    type Err = RegistroIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self).map_err(|err| RegistroIdError {
            value: s.to_owned(),
            reason: err.to_string(),
        })
    }
}

/// Free-form descriptive fields of a registro.
///
/// Never contains the reserved keys (`id`, `_id`, `user`, `createdAt`,
/// `updatedAt`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistroFields(Map<String, Value>);

impl RegistroFields {
    /// Build fields from a JSON map, dropping reserved keys.
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(
            map.into_iter()
                .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
                .collect(),
        )
    }

    /// Look up a field value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a field holding a string.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Overwrite the fields present in `other`, leaving the rest untouched.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Borrow the underlying JSON map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into the underlying JSON map.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Raw registro body as received from a client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistroBody(Map<String, Value>);

impl RegistroBody {
    /// Accept any JSON object; other JSON values are rejected.
    pub fn from_value(value: Value) -> Result<Self, RegistroValidationError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(RegistroValidationError::NotAnObject),
        }
    }

    /// Validate the body for creation.
    ///
    /// `nomeAluno` and `user` must be present; `user` must be a user id.
    ///
    /// # Examples
    /// ```
    /// use registros::domain::RegistroBody;
    /// use serde_json::json;
    ///
    /// let body = RegistroBody::from_value(json!({
    ///     "nomeAluno": "Ana",
    ///     "user": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
    /// }))
    /// .expect("object body");
    /// let draft = body.into_draft().expect("valid draft");
    /// assert_eq!(draft.fields.text("nomeAluno"), Some("Ana"));
    /// ```
    pub fn into_draft(mut self) -> Result<RegistroDraft, RegistroValidationError> {
        if !is_present(self.0.get(NOME_ALUNO)) {
            return Err(RegistroValidationError::MissingField { field: NOME_ALUNO });
        }
        let user = match self.0.remove(USER) {
            Some(value) if is_present(Some(&value)) => parse_user(value)?,
            _ => return Err(RegistroValidationError::MissingField { field: USER }),
        };
        Ok(RegistroDraft {
            user,
            fields: RegistroFields::from_map(self.0),
        })
    }

    /// Interpret the body as a partial update.
    ///
    /// A `user` of `null` clears the owner reference; an absent `user` keeps
    /// it.
    pub fn into_patch(mut self) -> Result<RegistroPatch, RegistroValidationError> {
        let user = match self.0.remove(USER) {
            None => None,
            Some(Value::Null) => Some(None),
            Some(value) => Some(Some(parse_user(value)?)),
        };
        Ok(RegistroPatch {
            user,
            fields: RegistroFields::from_map(self.0),
        })
    }
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(text)) => !text.is_empty(),
        Some(_) => true,
    }
}

fn parse_user(value: Value) -> Result<UserId, RegistroValidationError> {
    let raw = match value {
        Value::String(raw) => raw,
        other => other.to_string(),
    };
    UserId::new(&raw).map_err(|_| RegistroValidationError::InvalidUser { value: raw })
}

/// Validated input for a new registro.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistroDraft {
    pub user: UserId,
    pub fields: RegistroFields,
}

/// Partial update of a registro.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistroPatch {
    /// `None` keeps the owner, `Some(None)` clears it.
    pub user: Option<Option<UserId>>,
    pub fields: RegistroFields,
}

/// Persisted registro.
#[derive(Debug, Clone, PartialEq)]
pub struct Registro {
    id: RegistroId,
    user: Option<UserId>,
    fields: RegistroFields,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Registro {
    /// Create a registro from a validated draft, assigning a fresh id.
    pub fn create(draft: RegistroDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: RegistroId::random(),
            user: Some(draft.user),
            fields: draft.fields,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rehydrate a registro loaded from storage.
    pub fn from_parts(
        id: RegistroId,
        user: Option<UserId>,
        fields: RegistroFields,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user,
            fields,
            created_at,
            updated_at,
        }
    }

    /// Merge the supplied fields and refresh `updated_at`.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use registros::domain::{Registro, RegistroBody};
    /// use serde_json::json;
    ///
    /// let draft = RegistroBody::from_value(json!({
    ///     "nomeAluno": "Ana",
    ///     "resumoAula": "Frações",
    ///     "user": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
    /// }))
    /// .and_then(RegistroBody::into_draft)
    /// .expect("valid draft");
    /// let mut registro = Registro::create(draft, Utc::now());
    ///
    /// let patch = RegistroBody::from_value(json!({"nomeAluno": "Ana Maria"}))
    ///     .and_then(RegistroBody::into_patch)
    ///     .expect("valid patch");
    /// registro.apply(patch, Utc::now());
    ///
    /// assert_eq!(registro.fields().text("nomeAluno"), Some("Ana Maria"));
    /// assert_eq!(registro.fields().text("resumoAula"), Some("Frações"));
    /// ```
    pub fn apply(&mut self, patch: RegistroPatch, now: DateTime<Utc>) {
        let RegistroPatch { user, fields } = patch;
        if let Some(user) = user {
            self.user = user;
        }
        self.fields.merge(fields);
        self.updated_at = now;
    }

    pub fn id(&self) -> RegistroId {
        self.id
    }

    /// Owner reference, if any.
    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    pub fn fields(&self) -> &RegistroFields {
        &self.fields
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
