//! The credential store: one connection, one table, parameterized SQL.
//!
//! # Pre-conditions
//! - The `users_data_info` table exists (see `schema.sql`).
//!
//! # Post-conditions
//! - A successful `insert_user` is committed before it returns.
//!
//! # Invariants
//! - Caller-supplied values only ever reach the database as bound parameters.
//! - Column identifiers come from `UserField`, never from caller text.

use std::future::Future;
use std::time::Duration;

use sqlx::any::AnyRow;
use sqlx::{AnyConnection, Connection, FromRow, Row};

use super::{DatabaseConfig, StoreError};

/// Table holding one row per registered user.
pub const USERS_TABLE: &str = "users_data_info";

/// A row of the user table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    /// Stored credential. The login flow writes Argon2id PHC strings here.
    pub password: String,
}

impl<'r> FromRow<'r, AnyRow> for UserRecord {
    fn from_row(row: &'r AnyRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            password: row.try_get("password")?,
        })
    }
}

/// Columns that lookups may filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Name,
}

impl UserField {
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
        }
    }
}

/// A single open connection to the user table.
///
/// Opened per flow invocation and closed when the flow finishes. Operations
/// after `close()` fail with `StoreError::NotConnected`.
pub struct CredentialStore {
    connection: Option<AnyConnection>,
    query_timeout: Duration,
}

impl CredentialStore {
    /// Open a connection.
    ///
    /// # Errors
    /// Returns `StoreError::Connection` if the database is unreachable or the
    /// connect timeout elapses first.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        sqlx::any::install_default_drivers();
        tracing::debug!(database = %config.redacted_url(), "getting connection to database");

        let connection =
            connect_within(config.connect_timeout(), AnyConnection::connect(config.url())).await?;

        Ok(Self {
            connection: Some(connection),
            query_timeout: config.query_timeout(),
        })
    }

    /// Release the connection. Calling it again is a no-op.
    pub async fn close(&mut self) {
        let Some(connection) = self.connection.take() else {
            return;
        };
        if let Err(e) = connection.close().await {
            tracing::warn!("error while closing database connection: {e}");
        }
    }

    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Append one user row.
    ///
    /// # Errors
    /// Returns `StoreError::Duplicate` when the name is already taken and
    /// `StoreError::Persistence` on any other backend failure or timeout.
    pub async fn insert_user(&mut self, name: &str, password: &str) -> Result<(), StoreError> {
        let query_timeout = self.query_timeout;
        let connection = self.connection()?;
        let sql = format!("INSERT INTO {USERS_TABLE} (name, password) VALUES ($1, $2)");

        let result = with_timeout(
            query_timeout,
            sqlx::query(&sql)
                .bind(name)
                .bind(password)
                .execute(&mut *connection),
        )
        .await;

        if let Err(e) = &result {
            tracing::error!("failed to register user: {e}");
        }
        result.map(|_| ())
    }

    /// Every row whose `field` equals `value`, ordered by row id.
    ///
    /// Returns an empty `Vec` when nothing matches.
    ///
    /// # Errors
    /// Returns `StoreError::Persistence` on backend failure or timeout.
    pub async fn find_by_field(
        &mut self,
        field: UserField,
        value: &str,
    ) -> Result<Vec<UserRecord>, StoreError> {
        let query_timeout = self.query_timeout;
        let connection = self.connection()?;
        let sql = format!(
            "SELECT id, name, password FROM {USERS_TABLE} WHERE {} = $1 ORDER BY id",
            field.column()
        );

        let result = with_timeout(
            query_timeout,
            sqlx::query_as::<_, UserRecord>(&sql)
                .bind(value)
                .fetch_all(&mut *connection),
        )
        .await;

        if let Err(e) = &result {
            tracing::error!("failed to get filtered value: {e}");
        }
        result
    }

    fn connection(&mut self) -> Result<&mut AnyConnection, StoreError> {
        self.connection.as_mut().ok_or(StoreError::NotConnected)
    }
}

/// Await a connection attempt, turning an elapsed deadline into `Connection`.
async fn connect_within<F>(limit: Duration, connecting: F) -> Result<AnyConnection, StoreError>
where
    F: Future<Output = Result<AnyConnection, sqlx::Error>>,
{
    match tokio::time::timeout(limit, connecting).await {
        Ok(Ok(connection)) => Ok(connection),
        Ok(Err(e)) => {
            tracing::error!("failed to connect to database: {e}");
            Err(StoreError::Connection(e.to_string()))
        }
        Err(_) => {
            tracing::error!("failed to connect to database: timed out after {limit:?}");
            Err(StoreError::Connection(format!("timed out after {limit:?}")))
        }
    }
}

/// Run a query future, turning an elapsed deadline into `Persistence`.
async fn with_timeout<T, F>(limit: Duration, query: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, query).await {
        Ok(result) => result.map_err(StoreError::from),
        Err(_) => Err(StoreError::Persistence(format!("query timed out after {limit:?}"))),
    }
}
