//! Error kinds surfaced by the authentication flow.
//!
//! Lower layers never recover; their errors are converted here and travel
//! unchanged to the HTTP boundary, the only place that picks a status code.

use crate::auth::PasswordError;
use crate::store::StoreError;

/// Outcome of a failed register, login, lookup or token check.
#[derive(Debug)]
pub enum AuthError {
    /// The database could not be reached.
    Connection(String),
    /// A query failed.
    Persistence(String),
    /// No user has the requested name.
    NotFound,
    /// The user exists but the password does not match.
    InvalidCredentials,
    /// The bearer token failed signature, format or expiry checks.
    InvalidToken,
    /// The token is valid but belongs to someone else.
    AccessDenied,
    /// Registration for a name that is already taken.
    UserAlreadyExists,
    /// Anything else that is the server's fault.
    Internal(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection(reason) => write!(f, "failed to connect to database: {reason}"),
            Self::Persistence(reason) => write!(f, "database query failed: {reason}"),
            Self::NotFound => write!(f, "user not found"),
            Self::InvalidCredentials => write!(f, "password or user name incorrect"),
            Self::InvalidToken => write!(f, "could not validate credentials"),
            Self::AccessDenied => write!(f, "access denied"),
            Self::UserAlreadyExists => write!(f, "user already exists"),
            Self::Internal(reason) => write!(f, "internal error: {reason}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<StoreError> for AuthError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Connection(reason) => Self::Connection(reason),
            StoreError::Persistence(reason) => Self::Persistence(reason),
            StoreError::Duplicate(_) => Self::UserAlreadyExists,
            StoreError::NotConnected => Self::Internal(StoreError::NotConnected.to_string()),
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(error: PasswordError) -> Self {
        Self::Internal(error.to_string())
    }
}
