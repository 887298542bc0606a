use std::time::Duration;

use sqlx::{AnyConnection, Connection};
use tempfile::TempDir;

use crate::auth::JwtConfig;
use crate::service::LoginService;
use crate::store::{CredentialStore, DatabaseConfig, USERS_TABLE};

/// Secret used by every test `JwtConfig`.
pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-that-is-long-enough";

/// A throwaway SQLite database holding an empty user table.
///
/// The database file lives in a temporary directory that is removed when the
/// value is dropped.
pub struct TestDatabase {
    config: DatabaseConfig,
    _dir: TempDir,
}

impl TestDatabase {
    /// Create the database file and the user table.
    #[allow(clippy::expect_used)]
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("users.db").display());
        let config = DatabaseConfig::from_url(url)
            .with_timeouts(Duration::from_secs(5), Duration::from_secs(5));

        sqlx::any::install_default_drivers();
        let mut connection = AnyConnection::connect(config.url())
            .await
            .expect("Failed to open test database");
        let ddl = format!(
            "CREATE TABLE {USERS_TABLE} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL
            )"
        );
        sqlx::query(&ddl)
            .execute(&mut connection)
            .await
            .expect("Failed to create user table");
        connection
            .close()
            .await
            .expect("Failed to close setup connection");

        Self { config, _dir: dir }
    }

    /// Open a store on this database.
    #[allow(clippy::expect_used)]
    pub async fn connect(&self) -> CredentialStore {
        CredentialStore::connect(&self.config)
            .await
            .expect("Failed to connect to test database")
    }

    /// A `LoginService` backed by this database and `TEST_JWT_SECRET`.
    #[must_use]
    pub fn service(&self) -> LoginService {
        LoginService::new(self.config.clone(), test_jwt_config())
    }
}

/// `JwtConfig` with `TEST_JWT_SECRET` and a two hour lifetime.
#[allow(clippy::expect_used)]
#[must_use]
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig::new_hs512(TEST_JWT_SECRET.to_vec(), Duration::from_secs(7200))
        .expect("Failed to build test JWT config")
}
