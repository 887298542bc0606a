//! Token signing configuration.
//!
//! # Pre-conditions
//! - The HS512 secret must contain at least one byte.
//!
//! # Post-conditions
//! - `JwtConfig` instances are immutable once created.
//!
//! # Invariants
//! - The secret is never empty.
//! - The token lifetime is never zero.
//! - The secret never appears in `Debug` output.

use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

/// Algorithm every token is signed and verified with.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS512;

/// Error returned when JWT configuration is invalid.
#[derive(Debug, PartialEq, Eq)]
pub enum JwtConfigError {
    /// The HS512 secret is empty.
    EmptySecret,
    /// The token lifetime is zero.
    ZeroLifetime,
}

impl std::fmt::Display for JwtConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySecret => write!(f, "HS512 secret must not be empty"),
            Self::ZeroLifetime => write!(f, "token lifetime must be greater than zero"),
        }
    }
}

impl std::error::Error for JwtConfigError {}

/// JWT signing/verification configuration.
///
/// One symmetric secret is used both to sign and to verify. Replacing it
/// invalidates every token issued under the old secret.
#[derive(Clone)]
pub struct JwtConfig {
    secret: Vec<u8>,
    token_lifetime: Duration,
}

impl JwtConfig {
    /// Create a new HS512 JWT configuration.
    ///
    /// # Errors
    /// Returns `JwtConfigError::EmptySecret` if the secret is empty and
    /// `JwtConfigError::ZeroLifetime` if `token_lifetime` is zero.
    pub fn new_hs512(secret: Vec<u8>, token_lifetime: Duration) -> Result<Self, JwtConfigError> {
        if secret.is_empty() {
            return Err(JwtConfigError::EmptySecret);
        }
        if token_lifetime.is_zero() {
            return Err(JwtConfigError::ZeroLifetime);
        }
        Ok(Self {
            secret,
            token_lifetime,
        })
    }

    /// How long an issued token stays valid.
    #[must_use]
    pub const fn token_lifetime(&self) -> Duration {
        self.token_lifetime
    }

    pub(crate) fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(&self.secret)
    }

    pub(crate) fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(&self.secret)
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("algorithm", &TOKEN_ALGORITHM)
            .field("secret", &"<redacted>")
            .field("token_lifetime", &self.token_lifetime)
            .finish()
    }
}
