//! Test that SQL metacharacters in names are treated as data.

use axum::http::StatusCode;

use crate::e2e_tests::helpers::*;

const INJECTION: &str = "x' OR '1'='1";

#[tokio::test]
async fn test_injection_login_matches_nothing() {
    let server = TestServer::new().await;
    server.register("alice", "pw").await;

    let resp = server.login(INJECTION, "pw").await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_injection_name_is_stored_literally() {
    let server = TestServer::new().await;
    server.register("alice", "pw").await;

    assert_eq!(server.register(INJECTION, "pw2").await.status, StatusCode::OK);

    let resp = server.login(INJECTION, "pw2").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["name"], INJECTION);

    // alice is untouched.
    assert_eq!(server.login("alice", "pw").await.status, StatusCode::OK);
    assert_eq!(server.login("alice", "pw2").await.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_statement_terminator_in_name() {
    let server = TestServer::new().await;
    let name = "bob'; DROP TABLE users_data_info; --";

    assert_eq!(server.register(name, "pw").await.status, StatusCode::OK);
    assert_eq!(server.register("carol", "pw").await.status, StatusCode::OK);
    assert_eq!(server.login("carol", "pw").await.status, StatusCode::OK);
}
