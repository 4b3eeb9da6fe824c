//! Verifier accepting a fixed set of configured API tokens.
//!
//! Only SHA-256 digests of the configured tokens are retained. Presented
//! tokens are hashed and compared against every digest without early exit.

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::domain::BearerToken;
use crate::domain::ports::{TokenVerifier, TokenVerifierError};

type TokenDigest = [u8; 32];

fn digest(token: &str) -> TokenDigest {
    let mut out = [0_u8; 32];
    out.copy_from_slice(&Sha256::digest(token.as_bytes()));
    out
}

fn digests_equal(left: &TokenDigest, right: &TokenDigest) -> bool {
    left.iter()
        .zip(right.iter())
        .fold(0_u8, |acc, (l, r)| acc | (l ^ r))
        == 0
}

/// In-process verifier over a static token list.
///
/// # Examples
/// ```
/// use registros::domain::BearerToken;
/// use registros::domain::ports::TokenVerifier;
/// use registros::outbound::auth::StaticTokenVerifier;
///
/// # async fn demo() {
/// let verifier = StaticTokenVerifier::from_tokens(["s3cr3t"]);
/// let token = BearerToken::new("s3cr3t").expect("valid token");
/// assert!(verifier.verify(&token).await.expect("verifier available"));
/// # }
/// ```
#[derive(Clone)]
pub struct StaticTokenVerifier {
    digests: Vec<TokenDigest>,
}

impl StaticTokenVerifier {
    /// Build a verifier accepting each non-blank token in `tokens`.
    pub fn from_tokens<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let digests = tokens
            .into_iter()
            .map(|token| token.as_ref().trim().to_owned())
            .filter(|token| !token.is_empty())
            .map(|token| digest(&token))
            .collect();
        Self { digests }
    }

    /// Number of accepted tokens.
    pub fn len(&self) -> usize {
        self.digests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &BearerToken) -> Result<bool, TokenVerifierError> {
        let presented = digest(token.expose());
        Ok(self
            .digests
            .iter()
            .fold(false, |matched, candidate| {
                digests_equal(candidate, &presented) | matched
            }))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for static token verification.
    use super::*;
    use rstest::rstest;

    fn bearer(raw: &str) -> BearerToken {
        BearerToken::new(raw).expect("valid bearer token")
    }

    #[rstest]
    #[case("alpha", true)]
    #[case("beta", true)]
    #[case("gamma", false)]
    #[case("alph", false)]
    #[tokio::test]
    async fn verifies_against_configured_tokens(#[case] presented: &str, #[case] expected: bool) {
        let verifier = StaticTokenVerifier::from_tokens(["alpha", "beta"]);
        let accepted = verifier
            .verify(&bearer(presented))
            .await
            .expect("verification succeeds");
        assert_eq!(accepted, expected);
    }

    #[rstest]
    fn blank_tokens_are_ignored() {
        let verifier = StaticTokenVerifier::from_tokens(["", "  ", "alpha"]);
        assert_eq!(verifier.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn empty_verifier_rejects_everything() {
        let verifier = StaticTokenVerifier::from_tokens(Vec::<String>::new());
        assert!(verifier.is_empty());
        let accepted = verifier
            .verify(&bearer("alpha"))
            .await
            .expect("verification succeeds");
        assert!(!accepted);
    }

    #[rstest]
    fn digest_comparison_detects_single_byte_change() {
        let original = digest("alpha");
        let mut altered = original;
        altered[31] ^= 1;
        assert!(digests_equal(&original, &original));
        assert!(!digests_equal(&original, &altered));
    }
}
