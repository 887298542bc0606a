//! HTTP surface of the login server.
//!
//! Routes (all nested under `/login/api`):
//!
//! - `POST /registry`: create a user
//! - `POST /login`: exchange a name/password pair for an access token
//! - `GET /user/{user_name}`: the caller's own record, bearer token required

mod extract;
mod handlers;
mod response;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::service::LoginService;

pub use extract::{BearerToken, MissingBearerToken};
pub use handlers::CredentialsPayload;
pub use response::{ErrorBody, UserInfo};

/// Prefix every route is mounted under.
pub const API_PREFIX: &str = "/login/api";

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<LoginService>,
}

/// Build the application router.
#[must_use]
pub fn router(service: Arc<LoginService>) -> Router {
    let api = Router::new()
        .route("/registry", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/user/{user_name}", get(handlers::get_user));

    Router::new()
        .nest(API_PREFIX, api)
        .with_state(AppState { service })
}
