//! Test `POST /login`.

use axum::http::StatusCode;

use crate::auth::verify_token;
use crate::e2e_tests::helpers::*;
use crate::testing::test_jwt_config;

#[tokio::test]
async fn test_login_returns_name_and_token() {
    let server = TestServer::new().await;
    server.register("alice", "pw").await;

    let resp = server.login("alice", "pw").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["name"], "alice");
    let token = resp.body["access_token"].as_str().expect("token string");
    assert_eq!(verify_token(token, &test_jwt_config()).expect("valid token"), "alice");
}

#[tokio::test]
async fn test_login_wrong_password_is_forbidden() {
    let server = TestServer::new().await;
    server.register("alice", "pw").await;

    let resp = server.login("alice", "wrong").await;

    assert_eq!(resp.status, StatusCode::FORBIDDEN);
    assert_eq!(resp.body["detail"], "Password or user name incorrect");
}

#[tokio::test]
async fn test_login_unknown_user_is_not_found() {
    let server = TestServer::new().await;

    let resp = server.login("ghost", "pw").await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body["detail"], "User not found");
}

#[tokio::test]
async fn test_login_is_case_sensitive() {
    let server = TestServer::new().await;
    server.register("alice", "pw").await;

    assert_eq!(server.login("Alice", "pw").await.status, StatusCode::NOT_FOUND);
    assert_eq!(server.login("alice", "PW").await.status, StatusCode::FORBIDDEN);
}
