//! Bearer-token extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chirpy_core::error::CoreError;
use chirpy_core::types::DbId;

use crate::auth::guard::{extract_bearer, require_access_token};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT access token in the
/// `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// Refresh tokens are rejected here even if presented as `Bearer`.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// The user's id (from `claims.sub`).
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = require_access_token(&parts.headers, &state.config.jwt.secret)?;
        Ok(AuthUser { user_id })
    }
}

/// Raw bearer token of any shape. Used by the refresh-token endpoints, where
/// the token is opaque and validated by lookup rather than signature.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_bearer(&parts.headers)
            .map_err(|e| AppError::Core(CoreError::Unauthorized(e.to_string())))?;
        Ok(BearerToken(token.to_string()))
    }
}
