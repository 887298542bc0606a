use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use super::AppState;
use super::extract::BearerToken;
use super::response::UserInfo;
use crate::error::AuthError;
use crate::service::LoginResponse;

/// Body of `POST /registry` and `POST /login`.
#[derive(Debug, Deserialize)]
pub struct CredentialsPayload {
    pub name: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<Json<&'static str>, AuthError> {
    tracing::info!("registering user");
    let message = state
        .service
        .register(&payload.name, &payload.password)
        .await?;
    Ok(Json(message))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<Json<LoginResponse>, AuthError> {
    tracing::info!("login user");
    let response = state.service.login(&payload.name, &payload.password).await?;
    Ok(Json(response))
}

/// Return the caller's own record.
///
/// The token must verify and name an existing user; that user must be the
/// one in the path.
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_name): Path<String>,
    BearerToken(token): BearerToken,
) -> Result<Json<UserInfo>, AuthError> {
    tracing::info!("get user info");
    let logged_in_user = state.service.authenticate(&token).await?;
    if logged_in_user != user_name {
        tracing::warn!(
            user = %logged_in_user,
            requested = %user_name,
            "access denied: token belongs to another user"
        );
        return Err(AuthError::AccessDenied);
    }

    let user = state.service.fetch_user(&user_name).await?;
    Ok(Json(UserInfo::from(user)))
}
