//! Handlers for login and the refresh-token endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chirpy_core::error::CoreError;
use chirpy_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::issue_access_token;
use crate::auth::password::{verify_password, PasswordError};
use crate::auth::refresh::{create_refresh_token, exchange_refresh_token, revoke_refresh_token};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::BearerToken;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Incorrect email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login: the user plus a fresh token pair.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id: DbId,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Access token (JWT).
    pub token: String,
    pub refresh_token: String,
}

/// Response for `POST /refresh`.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/login
///
/// Unknown email and wrong password produce the same 401.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = state
        .store
        .find_user_by_email(input.email.trim())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    match verify_password(&input.password, &user.hashed_password) {
        Ok(()) => {}
        Err(PasswordError::Mismatch) => {
            tracing::debug!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(AppError::Core(CoreError::Unauthorized(
                INVALID_CREDENTIALS.into(),
            )));
        }
        Err(e) => {
            return Err(AppError::Core(CoreError::Internal(format!(
                "Password verification error: {e}"
            ))))
        }
    }

    let jwt = &state.config.jwt;
    let token = issue_access_token(user.id, &jwt.secret, jwt.access_token_ttl())
        .map_err(|e| AppError::Core(CoreError::Internal(format!("Token generation error: {e}"))))?;
    let refresh = create_refresh_token(state.store.as_ref(), user.id, jwt).await?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        id: user.id,
        email: user.email,
        created_at: user.created_at,
        updated_at: user.updated_at,
        token,
        refresh_token: refresh.token,
    }))
}

/// POST /api/refresh
///
/// Exchange the refresh token in the `Authorization` header for a new
/// access token. The refresh token stays valid.
pub async fn refresh(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> AppResult<Json<RefreshResponse>> {
    let token = exchange_refresh_token(state.store.as_ref(), &token, &state.config.jwt).await?;
    Ok(Json(RefreshResponse { token }))
}

/// POST /api/revoke
///
/// Permanently revoke the refresh token in the `Authorization` header.
pub async fn revoke(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> AppResult<StatusCode> {
    revoke_refresh_token(state.store.as_ref(), &token).await?;
    tracing::info!("Refresh token revoked");
    Ok(StatusCode::NO_CONTENT)
}
