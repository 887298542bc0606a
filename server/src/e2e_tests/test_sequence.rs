//! Test the register, login, fetch sequence for a single user.

use axum::http::StatusCode;
use serde_json::json;

use crate::e2e_tests::helpers::*;

#[tokio::test]
async fn test_register_login_fetch() {
    let server = TestServer::new().await;

    let registered = server.register("bob", "secret").await;
    assert_eq!(registered.status, StatusCode::OK);
    assert_eq!(registered.body, json!("User registered successfully"));

    let logged_in = server.login("bob", "secret").await;
    assert_eq!(logged_in.status, StatusCode::OK);
    assert_eq!(logged_in.body["name"], "bob");
    let token = logged_in.body["access_token"]
        .as_str()
        .expect("token string")
        .to_string();

    let fetched = server.get_user("bob", Some(&token)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["name"], "bob");
    assert!(fetched.body["password"].is_string());

    let anonymous = server.get_user("bob", None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_users_are_isolated() {
    let server = TestServer::new().await;
    let alice = server.register_and_login("alice", "a-pw").await;
    let bob = server.register_and_login("bob", "b-pw").await;

    assert_eq!(server.get_user("alice", Some(&alice)).await.status, StatusCode::OK);
    assert_eq!(server.get_user("bob", Some(&bob)).await.status, StatusCode::OK);
    assert_eq!(
        server.get_user("alice", Some(&bob)).await.status,
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        server.get_user("bob", Some(&alice)).await.status,
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn test_repeated_logins_all_work() {
    let server = TestServer::new().await;
    server.register("bob", "secret").await;

    for _ in 0..3 {
        let resp = server.login("bob", "secret").await;
        assert_eq!(resp.status, StatusCode::OK);
        let token = resp.body["access_token"].as_str().expect("token string");
        assert_eq!(server.get_user("bob", Some(token)).await.status, StatusCode::OK);
    }
}
