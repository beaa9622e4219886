//! Handlers for the `/users` resource (registration and self-update).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chirpy_core::error::CoreError;
use chirpy_db::models::user::{CreateUser, UpdateCredentials, UserResponse};
use chirpy_db::StoreError;
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users` and `PUT /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct UserCredentials {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

impl UserCredentials {
    /// Trim the email and run field validation.
    fn normalized(mut self) -> AppResult<Self> {
        self.email = self.email.trim().to_string();
        self.validate()
            .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
        Ok(self)
    }
}

fn hash(password: &str) -> AppResult<String> {
    hash_password(password)
        .map_err(|e| AppError::Core(CoreError::Internal(format!("Password hashing error: {e}"))))
}

/// Unique-email violations become a 409 with a readable message.
fn email_conflict(err: StoreError) -> AppError {
    match err {
        StoreError::Duplicate { .. } => AppError::Core(CoreError::Conflict(
            "A user with this email already exists".into(),
        )),
        other => AppError::Store(other),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/users
///
/// Register a new user. Returns 409 if the email is already taken.
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(input): AppJson<UserCredentials>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let input = input.normalized()?;
    let hashed_password = hash(&input.password)?;

    let user = state
        .store
        .create_user(&CreateUser {
            email: input.email,
            hashed_password,
        })
        .await
        .map_err(email_conflict)?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PUT /api/users
///
/// Replace the authenticated user's email and password.
pub async fn update_user(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<UserCredentials>,
) -> AppResult<Json<UserResponse>> {
    let input = input.normalized()?;
    let hashed_password = hash(&input.password)?;

    let user = state
        .store
        .update_user_credentials(
            auth.user_id,
            &UpdateCredentials {
                email: input.email,
                hashed_password,
            },
        )
        .await
        .map_err(email_conflict)?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    tracing::info!(user_id = %user.id, "User credentials updated");
    Ok(Json(user.into()))
}
