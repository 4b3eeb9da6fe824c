//! API token configuration parsing and validation.
//!
//! Resolves the bearer tokens accepted by the API from a token file and/or an
//! inline token, falling back to a generated token in development. Release
//! builds refuse to start without an explicit token.

use std::path::{Path, PathBuf};

use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroizing;

/// Length of a token fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;
/// Length of a generated development token in bytes before hex encoding.
const EPHEMERAL_TOKEN_BYTES: usize = 32;

/// Build mode for token configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds fall back to a generated token.
    Debug,
    /// Release builds require an explicit token.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use registros::inbound::http::token_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Where to look for API tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSources<'a> {
    /// Inline token value.
    pub token: Option<&'a str>,
    /// File holding one token per line; blank lines and `#` comments are
    /// skipped.
    pub token_file: Option<&'a Path>,
    /// Permit a generated token when no token is configured.
    pub allow_ephemeral: bool,
}

/// Tokens accepted by the API.
pub struct ApiTokens {
    tokens: Vec<Zeroizing<String>>,
    ephemeral: bool,
}

impl ApiTokens {
    /// Borrow the raw token values.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|token| token.as_str())
    }

    /// Whether the tokens were generated for this process only.
    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }

    /// Fingerprints of every accepted token, safe to log.
    pub fn fingerprints(&self) -> Vec<String> {
        self.iter().map(token_fingerprint).collect()
    }
}

/// Errors raised while resolving API tokens.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    /// Neither a token nor a token file yielded a token.
    #[error("no API token configured; set REGISTROS_API_TOKEN or REGISTROS_API_TOKEN_FILE")]
    MissingToken,
    /// Reading the token file failed.
    #[error("failed to read API token file at {path}: {source}")]
    TokenFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Release builds must not allow generated tokens.
    #[error("REGISTROS_ALLOW_EPHEMERAL_TOKEN must be false in release builds")]
    EphemeralNotAllowed,
}

/// Resolve API tokens from the configured sources and build mode.
///
/// # Examples
///
/// ```rust
/// use registros::inbound::http::token_config::{
///     BuildMode, TokenSources, api_tokens_from_sources,
/// };
///
/// let tokens = api_tokens_from_sources(
///     TokenSources {
///         token: Some("s3cr3t"),
///         ..TokenSources::default()
///     },
///     BuildMode::Release,
/// )
/// .expect("inline token accepted");
/// assert_eq!(tokens.iter().collect::<Vec<_>>(), vec!["s3cr3t"]);
/// ```
pub fn api_tokens_from_sources(
    sources: TokenSources<'_>,
    mode: BuildMode,
) -> Result<ApiTokens, TokenConfigError> {
    if sources.allow_ephemeral && !mode.is_debug() {
        return Err(TokenConfigError::EphemeralNotAllowed);
    }
    let fallback_allowed = mode.is_debug() || sources.allow_ephemeral;

    let mut tokens = Vec::new();
    if let Some(path) = sources.token_file {
        match read_token_file(path) {
            Ok(from_file) => tokens.extend(from_file),
            Err(source) if fallback_allowed => {
                warn!(
                    path = %path.display(),
                    error = %source,
                    "API token file unreadable; ignoring (dev only)"
                );
            }
            Err(source) => {
                return Err(TokenConfigError::TokenFileRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }
    if let Some(token) = sources.token.map(str::trim).filter(|token| !token.is_empty()) {
        tokens.push(Zeroizing::new(token.to_owned()));
    }

    if !tokens.is_empty() {
        return Ok(ApiTokens {
            tokens,
            ephemeral: false,
        });
    }
    if !fallback_allowed {
        return Err(TokenConfigError::MissingToken);
    }

    let token = generate_token();
    warn!(token = token.as_str(), "using temporary API token (dev only)");
    Ok(ApiTokens {
        tokens: vec![token],
        ephemeral: true,
    })
}

fn read_token_file(path: &Path) -> std::io::Result<Vec<Zeroizing<String>>> {
    let contents = Zeroizing::new(std::fs::read_to_string(path)?);
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| Zeroizing::new(line.to_owned()))
        .collect())
}

fn generate_token() -> Zeroizing<String> {
    let mut bytes = Zeroizing::new([0_u8; EPHEMERAL_TOKEN_BYTES]);
    rand::thread_rng().fill_bytes(&mut *bytes);
    Zeroizing::new(hex::encode(&*bytes))
}

/// Truncated SHA-256 fingerprint of a token for operational logs.
///
/// # Examples
///
/// ```rust
/// use registros::inbound::http::token_config::token_fingerprint;
///
/// let fp = token_fingerprint("s3cr3t");
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn token_fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
