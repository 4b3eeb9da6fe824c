//! Port for deciding whether a bearer credential grants API access.

use async_trait::async_trait;

use crate::domain::BearerToken;

use super::define_port_error;

define_port_error! {
    /// Errors raised by token verifier adapters.
    pub enum TokenVerifierError {
        /// The verifier backend could not be reached.
        Unavailable { message: String } => "token verifier unavailable: {message}",
    }
}

/// Verifies bearer credentials on behalf of the authentication middleware.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Return `true` when `token` is accepted.
    async fn verify(&self, token: &BearerToken) -> Result<bool, TokenVerifierError>;
}
