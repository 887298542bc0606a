//! Server configuration module.
//!
//! This module provides configuration loading for the login server from
//! environment variables.
//!
//! # Environment Variables
//!
//! - `DB_HOST`: Database host (default: `localhost`)
//! - `DB_PORT`: Database port (default: `5432`)
//! - `POSTGRES_DB`: Database name (required unless `LOGIN_DATABASE_URL` is set)
//! - `POSTGRES_USER`: Database user (required unless `LOGIN_DATABASE_URL` is set)
//! - `POSTGRES_PASSWORD`: Database password (required unless `LOGIN_DATABASE_URL` is set)
//! - `LOGIN_DATABASE_URL`: Full connection URL, overrides the five settings above
//! - `LOGIN_DB_CONNECT_TIMEOUT_SECS`: Connect timeout in seconds (default: `5`)
//! - `LOGIN_DB_QUERY_TIMEOUT_SECS`: Query timeout in seconds (default: `10`)
//! - `LOGIN_JWT_SECRET`: HS512 signing secret (required)
//! - `LOGIN_TOKEN_TTL_SECS`: Access token lifetime in seconds (default: `7200`)
//! - `LOGIN_LISTEN_PORT`: Port to listen on (default: `3000`)
//!
//! # Invariants
//!
//! - `listen_port` is always a valid port number (1-65535)
//! - The JWT secret is never empty
//! - Timeouts and the token lifetime are never zero

use std::time::Duration;

use crate::auth::{JwtConfig, JwtConfigError};
use crate::store::DatabaseConfig;

/// Secrets shorter than this are accepted but logged as weak.
const RECOMMENDED_SECRET_LENGTH: usize = 64;

/// Server configuration.
///
/// Contains all configuration parameters needed to run the login server.
///
/// # Post-conditions
///
/// - `listen_port` is always in the valid range (1-65535)
/// - `jwt` holds a non-empty secret
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// How to reach the user table.
    pub database: DatabaseConfig,
    /// Token signing configuration.
    pub jwt: JwtConfig,
    /// Port to listen on for HTTP connections.
    pub listen_port: u16,
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable is missing.
    MissingEnvVar(String),
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEnvVar(name) => {
                write!(f, "missing required environment variable: {name}")
            }
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    /// Default port for the server.
    pub const DEFAULT_PORT: u16 = 3000;
    /// Default database host.
    pub const DEFAULT_DB_HOST: &'static str = "localhost";
    /// Default database port.
    pub const DEFAULT_DB_PORT: u16 = 5432;
    /// Default connect timeout in seconds.
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
    /// Default query timeout in seconds.
    pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 10;
    /// Default access token lifetime in seconds (two hours).
    pub const DEFAULT_TOKEN_TTL_SECS: u64 = 2 * 60 * 60;

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is unset or empty, or if a
    /// numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// `from_env` delegates here; tests pass a map instead of mutating the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = Self::load_database(&lookup)?;
        let jwt = Self::load_jwt(&lookup)?;
        let listen_port = parse_or(&lookup, "LOGIN_LISTEN_PORT", Self::DEFAULT_PORT)?;
        if listen_port == 0 {
            return Err(ConfigError::InvalidValue {
                name: "LOGIN_LISTEN_PORT".to_string(),
                message: "'0' is not a valid port number (must be 1-65535)".to_string(),
            });
        }

        Ok(Self {
            database,
            jwt,
            listen_port,
        })
    }

    /// Build the database settings.
    ///
    /// `LOGIN_DATABASE_URL` wins when set; otherwise the discrete Postgres
    /// variables are combined into a URL.
    fn load_database<F>(lookup: &F) -> Result<DatabaseConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let connect_timeout = Duration::from_secs(non_zero(
            lookup,
            "LOGIN_DB_CONNECT_TIMEOUT_SECS",
            Self::DEFAULT_CONNECT_TIMEOUT_SECS,
        )?);
        let query_timeout = Duration::from_secs(non_zero(
            lookup,
            "LOGIN_DB_QUERY_TIMEOUT_SECS",
            Self::DEFAULT_QUERY_TIMEOUT_SECS,
        )?);

        if let Some(url) = lookup("LOGIN_DATABASE_URL").filter(|url| !url.is_empty()) {
            return Ok(DatabaseConfig::from_url(url)
                .with_timeouts(connect_timeout, query_timeout));
        }

        let host = lookup("DB_HOST")
            .filter(|host| !host.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_DB_HOST.to_string());
        let port = parse_or(lookup, "DB_PORT", Self::DEFAULT_DB_PORT)?;
        let database = required(lookup, "POSTGRES_DB")?;
        let user = required(lookup, "POSTGRES_USER")?;
        let password = required(lookup, "POSTGRES_PASSWORD")?;

        Ok(
            DatabaseConfig::postgres(&host, port, &database, &user, &password)
                .with_timeouts(connect_timeout, query_timeout),
        )
    }

    /// Build the token configuration.
    fn load_jwt<F>(lookup: &F) -> Result<JwtConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = required(lookup, "LOGIN_JWT_SECRET")?;
        if is_weak_secret(&secret) {
            tracing::warn!(
                "LOGIN_JWT_SECRET is shorter than {RECOMMENDED_SECRET_LENGTH} bytes; tokens are easier to forge"
            );
        }
        let ttl = non_zero(lookup, "LOGIN_TOKEN_TTL_SECS", Self::DEFAULT_TOKEN_TTL_SECS)?;

        JwtConfig::new_hs512(secret.into_bytes(), Duration::from_secs(ttl)).map_err(
            |e: JwtConfigError| ConfigError::InvalidValue {
                name: "LOGIN_JWT_SECRET".to_string(),
                message: e.to_string(),
            },
        )
    }
}

/// Whether `secret` is shorter than a full HS512 key.
fn is_weak_secret(secret: &str) -> bool {
    secret.len() < RECOMMENDED_SECRET_LENGTH
}

/// Fetch a variable that must be present and non-empty.
fn required<F>(lookup: &F, name: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))?;
    if value.is_empty() {
        return Err(ConfigError::InvalidValue {
            name: name.to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(value)
}

/// Parse a variable, falling back to `default` when it is not set.
fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value.parse::<T>().map_err(|_| ConfigError::InvalidValue {
            name: name.to_string(),
            message: format!("'{value}' is not a valid number"),
        }),
        None => Ok(default),
    }
}

/// Like `parse_or`, but rejects zero.
fn non_zero<F>(lookup: &F, name: &str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = parse_or(lookup, name, default)?;
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            name: name.to_string(),
            message: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}
