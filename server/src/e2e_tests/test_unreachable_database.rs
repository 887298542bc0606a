//! Test that a database failure surfaces as a server error.

use axum::http::StatusCode;

use crate::e2e_tests::helpers::*;
use crate::store::DatabaseConfig;

fn unreachable_database(dir: &tempfile::TempDir) -> DatabaseConfig {
    // mode=ro refuses to create the missing file, so every connect fails.
    DatabaseConfig::from_url(format!(
        "sqlite://{}?mode=ro",
        dir.path().join("absent.db").display()
    ))
}

#[tokio::test]
async fn test_register_without_database_is_server_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let server = TestServer::with_database(unreachable_database(&dir));

    let resp = server.register("bob", "secret").await;

    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.body["detail"], "Failed to connect to database");
}

#[tokio::test]
async fn test_login_without_database_is_server_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let server = TestServer::with_database(unreachable_database(&dir));

    let resp = server.login("bob", "secret").await;

    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
}
