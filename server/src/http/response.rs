//! Mapping flow outcomes onto HTTP responses.
//!
//! This is the only place an `AuthError` becomes a status code. Server-side
//! failures are logged here and answered with a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AuthError;
use crate::store::UserRecord;

/// Error body: `{"detail": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn json(detail: impl Into<String>) -> Json<Self> {
        Json(Self {
            detail: detail.into(),
        })
    }
}

/// Body of `GET /user/{user_name}`.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub name: String,
    pub password: String,
}

impl From<UserRecord> for UserInfo {
    fn from(record: UserRecord) -> Self {
        Self {
            name: record.name,
            password: record.password,
        }
    }
}

impl AuthError {
    /// Status code for this error kind.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Connection(_) | Self::Persistence(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InvalidCredentials | Self::InvalidToken | Self::AccessDenied => {
                StatusCode::FORBIDDEN
            }
            Self::UserAlreadyExists => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let detail = match &self {
            Self::Connection(reason) => {
                tracing::error!("failed to connect to database: {reason}");
                "Failed to connect to database".to_string()
            }
            Self::Persistence(reason) => {
                tracing::error!("database query failed: {reason}");
                "Database error".to_string()
            }
            Self::Internal(reason) => {
                tracing::error!("internal error: {reason}");
                "Internal error".to_string()
            }
            Self::NotFound => "User not found".to_string(),
            Self::InvalidCredentials => "Password or user name incorrect".to_string(),
            Self::InvalidToken => "Could not validate credentials".to_string(),
            Self::AccessDenied => "Access denied".to_string(),
            Self::UserAlreadyExists => "User already exists".to_string(),
        };

        (self.status(), ErrorBody::json(detail)).into_response()
    }
}
