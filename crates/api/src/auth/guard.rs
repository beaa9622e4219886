//! Request-level authorization checks.
//!
//! These are plain functions over a [`HeaderMap`] so they can be tested
//! without a router; [`crate::middleware::auth`] wraps them as extractors.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use chirpy_core::error::CoreError;
use chirpy_core::types::DbId;

use super::jwt::{has_jwt_shape, validate_access_token, TokenError};

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BearerError {
    #[error("Missing Authorization header")]
    Missing,

    #[error("Invalid Authorization format. Expected: Bearer <token>")]
    Malformed,
}

/// Why a request failed to authenticate with an access token.
///
/// Every variant becomes a 401 at the boundary; the distinction exists for
/// logging and tests.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Bearer(#[from] BearerError),

    /// The bearer token is not a three-segment JWT (e.g. a refresh token).
    #[error("Bearer token is not an access token")]
    NotAccessToken,

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Client-facing message for an authentication failure. Token failures
/// share one message so clients cannot probe which check failed.
pub fn unauthorized_message(err: &AuthError) -> String {
    match err {
        AuthError::Bearer(e) => e.to_string(),
        AuthError::NotAccessToken => "Invalid token format".to_string(),
        AuthError::Token(_) => "Invalid or expired token".to_string(),
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is case-sensitive and must be followed by exactly one space
/// and a non-empty token with no further whitespace.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers.get(AUTHORIZATION).ok_or(BearerError::Missing)?;
    let value = value.to_str().map_err(|_| BearerError::Malformed)?;

    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(BearerError::Malformed)?;

    if token.is_empty() || token.chars().any(char::is_whitespace) {
        return Err(BearerError::Malformed);
    }
    Ok(token)
}

/// Authenticate a request with an access token and return the user id.
pub fn require_access_token(headers: &HeaderMap, secret: &str) -> Result<DbId, AuthError> {
    let token = extract_bearer(headers)?;
    if !has_jwt_shape(token) {
        return Err(AuthError::NotAccessToken);
    }
    Ok(validate_access_token(token, secret)?)
}

/// Confirm that `user_id` owns a resource owned by `owner_id`.
pub fn authorize_ownership(user_id: DbId, owner_id: DbId) -> Result<(), CoreError> {
    if user_id == owner_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "You are not the author of this chirp".into(),
        ))
    }
}
