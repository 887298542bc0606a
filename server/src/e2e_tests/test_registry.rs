//! Test `POST /registry`.

use axum::http::StatusCode;
use serde_json::json;

use crate::e2e_tests::helpers::*;

#[tokio::test]
async fn test_register_returns_success_message() {
    let server = TestServer::new().await;

    let resp = server.register("bob", "secret").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, json!("User registered successfully"));
}

#[tokio::test]
async fn test_register_duplicate_name_conflicts() {
    let server = TestServer::new().await;
    assert_eq!(server.register("bob", "secret").await.status, StatusCode::OK);

    let resp = server.register("bob", "another").await;

    assert_eq!(resp.status, StatusCode::CONFLICT);
    assert_eq!(resp.body["detail"], "User already exists");
}

#[tokio::test]
async fn test_register_duplicate_keeps_original_password() {
    let server = TestServer::new().await;
    server.register("bob", "secret").await;
    server.register("bob", "another").await;

    assert_eq!(server.login("bob", "secret").await.status, StatusCode::OK);
    assert_eq!(
        server.login("bob", "another").await.status,
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn test_register_missing_field_is_rejected() {
    let server = TestServer::new().await;

    let resp = server
        .post("/login/api/registry", &json!({ "name": "bob" }))
        .await;

    assert!(resp.status.is_client_error());
}
