//! Authentication primitives such as bearer credentials.
//!
//! Keep header parsing outside the domain by exposing constructors that
//! validate string inputs before middleware talks to the token verifier port.

use std::fmt;

use zeroize::Zeroizing;

const BEARER_SCHEME: &str = "bearer";

/// Validation errors for bearer credentials.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BearerTokenError {
    /// The header did not use the `Bearer` scheme.
    #[error("authorization scheme must be Bearer")]
    UnsupportedScheme,
    /// The token part was blank.
    #[error("bearer token must not be empty")]
    EmptyToken,
}

/// Opaque bearer credential presented by a client.
///
/// ## Invariants
/// - The token is non-empty and carries no surrounding whitespace.
/// - The secret is zeroed on drop and redacted from `Debug` output.
///
/// # Examples
/// ```
/// use registros::domain::BearerToken;
///
/// let token = BearerToken::from_authorization("Bearer s3cr3t").unwrap();
/// assert_eq!(token.expose(), "s3cr3t");
/// assert_eq!(format!("{token:?}"), "BearerToken(<redacted>)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    /// Construct a token from its raw value.
    pub fn new(token: &str) -> Result<Self, BearerTokenError> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(BearerTokenError::EmptyToken);
        }
        Ok(Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Parse an `Authorization` header value of the form `Bearer <token>`.
    ///
    /// The scheme is matched case-insensitively.
    pub fn from_authorization(header: &str) -> Result<Self, BearerTokenError> {
        let trimmed = header.trim_start();
        let (scheme, rest) = trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed, ""));
        if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
            return Err(BearerTokenError::UnsupportedScheme);
        }
        Self::new(rest)
    }

    /// Borrow the secret for verification.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}
