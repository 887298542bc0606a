//! Authentication module.
//!
//! Token signing configuration, access token issuance/verification and
//! password hashing for the login server.
//!
//! # Post-conditions
//! - Authentication configuration is immutable once loaded.
//!
//! # Invariants
//! - Tokens are always signed and verified with HS512.
//! - Plaintext passwords are never persisted.

pub mod config;
pub mod jwt;
pub mod password;

pub use config::{JwtConfig, JwtConfigError};
pub use jwt::{JwtError, issue_token, verify_token};
pub use password::{PasswordError, hash_password, verify_password};
