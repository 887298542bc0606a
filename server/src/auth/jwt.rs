//! JWT issuance and verification.
//!
//! Tokens are HS512-signed compact JWTs carrying a `sub` claim (the user
//! name) and an `exp` claim (seconds since the Unix epoch).
//!
//! # Post-conditions
//! - `issue_token` output always verifies under the same `JwtConfig` until
//!   its `exp` passes.
//! - `verify_token` returns the user name from the 'sub' claim on success and
//!   a descriptive error otherwise.
//!
//! # Invariants
//! - Verification is stateless. It does not check that the user still exists.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use super::config::{JwtConfig, TOKEN_ALGORITHM};

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Claims {
    /// Subject claim containing the user name.
    pub(crate) sub: String,
    /// Expiry, seconds since the Unix epoch.
    pub(crate) exp: u64,
}

/// Error returned when issuing or verifying a JWT fails.
#[derive(Debug)]
pub enum JwtError {
    /// The JWT signature is invalid.
    InvalidSignature,
    /// The JWT has expired.
    TokenExpired,
    /// The JWT is malformed or cannot be parsed.
    MalformedToken,
    /// The 'sub' claim is missing or empty.
    MissingSubClaim,
    /// The key material was rejected by the signer.
    InvalidKey(String),
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSignature => write!(f, "invalid JWT signature"),
            Self::TokenExpired => write!(f, "JWT has expired"),
            Self::MalformedToken => write!(f, "malformed JWT"),
            Self::MissingSubClaim => write!(f, "missing 'sub' claim in JWT"),
            Self::InvalidKey(reason) => write!(f, "invalid key: {reason}"),
        }
    }
}

impl std::error::Error for JwtError {}

/// Issues an access token for `name`, valid for the configured lifetime.
///
/// # Errors
/// Returns `JwtError::InvalidKey` if the signer rejects the key material.
pub fn issue_token(name: &str, config: &JwtConfig) -> Result<String, JwtError> {
    let exp = unix_now().saturating_add(config.token_lifetime().as_secs());
    encode_claims(name, exp, config)
}

/// Signs a claim set with an explicit expiry.
pub(crate) fn encode_claims(name: &str, exp: u64, config: &JwtConfig) -> Result<String, JwtError> {
    let claims = Claims {
        sub: name.to_string(),
        exp,
    };
    encode(&Header::new(TOKEN_ALGORITHM), &claims, &config.encoding_key())
        .map_err(|e| JwtError::InvalidKey(e.to_string()))
}

/// Verifies a JWT and extracts the user name from the 'sub' claim.
///
/// Signature, algorithm and expiry are all checked. Expiry has no leeway.
///
/// # Errors
/// Returns `JwtError` if verification fails for any reason.
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<String, JwtError> {
    let mut validation = Validation::new(TOKEN_ALGORITHM);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);
    let token_data =
        decode::<Claims>(token, &config.decoding_key(), &validation).map_err(map_jwt_error)?;

    let name = token_data.claims.sub;
    if name.is_empty() {
        return Err(JwtError::MissingSubClaim);
    }

    Ok(name)
}

/// Maps jsonwebtoken errors to our `JwtError` type.
fn map_jwt_error(error: jsonwebtoken::errors::Error) -> JwtError {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
        ErrorKind::InvalidSignature => JwtError::InvalidSignature,
        ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        ErrorKind::MissingRequiredClaim(claim) if claim == "sub" => JwtError::MissingSubClaim,
        _ => JwtError::MalformedToken,
    }
}

fn unix_now() -> u64 {
    // A clock before 1970 yields 0, which only makes tokens expire early.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}
