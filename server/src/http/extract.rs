//! Bearer token extraction.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};

use super::response::ErrorBody;

/// The raw token from an `Authorization: Bearer <token>` header.
///
/// Requests without one are rejected with `401` before any handler runs.
#[derive(Debug)]
pub struct BearerToken(pub String);

/// Rejection for a missing or non-bearer `Authorization` header.
#[derive(Debug)]
pub struct MissingBearerToken;

impl IntoResponse for MissingBearerToken {
    fn into_response(self) -> Response {
        tracing::debug!("request rejected: no bearer token");
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Bearer")],
            ErrorBody::json("Not authenticated"),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = MissingBearerToken;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_bearer)
            .map(|token| Self(token.to_string()))
            .ok_or(MissingBearerToken)
    }
}

/// Split `Bearer <token>`; the scheme is case-insensitive.
fn parse_bearer(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
