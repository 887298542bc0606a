//! Authentication flow: register, login, user lookup and the token-gated
//! identity check.
//!
//! Every operation opens its own `CredentialStore` and closes it before
//! returning, on success and on error alike. No state survives between calls
//! other than the configuration held by `LoginService`.

use serde::Serialize;

use crate::auth::{self, JwtConfig};
use crate::error::AuthError;
use crate::store::{CredentialStore, DatabaseConfig, UserField, UserRecord};

/// Body returned by a successful registration.
pub const REGISTERED_MESSAGE: &str = "User registered successfully";

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponse {
    pub name: String,
    pub access_token: String,
}

/// Orchestrates the credential store, password hasher and token issuer.
#[derive(Debug, Clone)]
pub struct LoginService {
    database: DatabaseConfig,
    jwt: JwtConfig,
}

impl LoginService {
    #[must_use]
    pub const fn new(database: DatabaseConfig, jwt: JwtConfig) -> Self {
        Self { database, jwt }
    }

    #[must_use]
    pub const fn jwt_config(&self) -> &JwtConfig {
        &self.jwt
    }

    /// Create a user.
    ///
    /// The password is hashed before it reaches the store.
    ///
    /// # Errors
    /// `UserAlreadyExists` if the name is taken, `Connection`/`Persistence`
    /// on database failure.
    pub async fn register(&self, name: &str, password: &str) -> Result<&'static str, AuthError> {
        let password_hash = hash_off_thread(password).await?;

        let mut store = CredentialStore::connect(&self.database).await?;
        let result = insert_if_absent(&mut store, name, &password_hash).await;
        store.close().await;
        result?;

        tracing::info!(user = %name, "user registered");
        Ok(REGISTERED_MESSAGE)
    }

    /// Check a name/password pair and issue an access token.
    ///
    /// # Errors
    /// `NotFound` for an unknown name, `InvalidCredentials` for a wrong
    /// password, `Connection`/`Persistence` on database failure.
    pub async fn login(&self, name: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let user = self.find_user(name).await?.ok_or(AuthError::NotFound)?;

        if !verify_off_thread(password, user.password).await? {
            tracing::warn!(user = %name, "login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = auth::issue_token(name, &self.jwt).map_err(|e| {
            tracing::error!("failed to issue token: {e}");
            AuthError::Internal(e.to_string())
        })?;

        tracing::info!(user = %name, "user logged in");
        Ok(LoginResponse {
            name: name.to_string(),
            access_token,
        })
    }

    /// Fetch the stored record for `name`.
    ///
    /// Performs no authorization; callers run `authenticate` first.
    ///
    /// # Errors
    /// `NotFound` if no row matches, `Connection`/`Persistence` on database
    /// failure.
    pub async fn fetch_user(&self, name: &str) -> Result<UserRecord, AuthError> {
        self.find_user(name).await?.ok_or(AuthError::NotFound)
    }

    /// Resolve a bearer token to an existing user name.
    ///
    /// # Errors
    /// `InvalidToken` if the token fails verification, `NotFound` if it names
    /// a user without a record, `Connection`/`Persistence` on database failure.
    pub async fn authenticate(&self, token: &str) -> Result<String, AuthError> {
        let name = auth::verify_token(token, &self.jwt).map_err(|e| {
            tracing::debug!("token rejected: {e}");
            AuthError::InvalidToken
        })?;

        if self.find_user(&name).await?.is_none() {
            tracing::debug!(user = %name, "token names a user without a record");
            return Err(AuthError::NotFound);
        }

        Ok(name)
    }

    /// First row for `name`. Later rows, if any, are ignored.
    async fn find_user(&self, name: &str) -> Result<Option<UserRecord>, AuthError> {
        let mut store = CredentialStore::connect(&self.database).await?;
        let rows = store.find_by_field(UserField::Name, name).await;
        store.close().await;

        Ok(rows?.into_iter().next())
    }
}

async fn insert_if_absent(
    store: &mut CredentialStore,
    name: &str,
    password_hash: &str,
) -> Result<(), AuthError> {
    if !store.find_by_field(UserField::Name, name).await?.is_empty() {
        tracing::debug!(user = %name, "registration rejected: name taken");
        return Err(AuthError::UserAlreadyExists);
    }
    // The unique constraint still catches a concurrent registration that
    // slips in between the check and the insert.
    store.insert_user(name, password_hash).await?;
    Ok(())
}

async fn hash_off_thread(password: &str) -> Result<String, AuthError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || auth::hash_password(&password))
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))?
        .map_err(AuthError::from)
}

async fn verify_off_thread(password: &str, hash: String) -> Result<bool, AuthError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || auth::verify_password(&password, &hash))
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))
}
