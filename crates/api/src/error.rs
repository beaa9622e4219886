use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chirpy_core::error::CoreError;
use chirpy_core::moderation::ModerationError;
use chirpy_db::StoreError;
use serde_json::json;

use crate::auth::guard::{unauthorized_message, AuthError};
use crate::auth::refresh::RefreshError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and the typed failures of the auth
/// and persistence layers. Implements [`IntoResponse`] to produce consistent
/// `{"error", "code"}` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `chirpy_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A persistence failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Access-token authentication failed. Always a 401; the cause is logged.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Refresh-token lookup, revocation, or exchange failed.
    #[error(transparent)]
    Refresh(#[from] RefreshError),

    /// The chirp body was rejected by moderation.
    #[error(transparent)]
    Moderation(#[from] ModerationError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(cause = %rejection.body_text(), "Request body rejected");
        let message = match rejection {
            JsonRejection::JsonDataError(_) => {
                "Request body is missing required fields or has fields of the wrong type"
            }
            JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON",
            JsonRejection::MissingJsonContentType(_) => {
                "Expected request with `Content-Type: application/json`"
            }
            _ => "Failed to read request body",
        };
        AppError::Core(CoreError::Validation(message.to_string()))
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

type ErrorParts = (StatusCode, &'static str, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),

            AppError::Store(err) => classify_store_error(err),

            AppError::Auth(err) => {
                tracing::debug!(cause = %err, "Access token rejected");
                (
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHORIZED",
                    unauthorized_message(err),
                )
            }

            AppError::Refresh(err) => match err {
                RefreshError::NotFound => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    "Refresh token not found".to_string(),
                ),
                RefreshError::Revoked | RefreshError::Expired => {
                    tracing::debug!(cause = %err, "Refresh token rejected");
                    (
                        StatusCode::UNAUTHORIZED,
                        "UNAUTHORIZED",
                        "Invalid or expired refresh token".to_string(),
                    )
                }
                RefreshError::Store(store) => classify_store_error(store),
                RefreshError::Token(token) => internal(token),
            },

            AppError::Moderation(err) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn classify_core_error(core: &CoreError) -> ErrorParts {
    match core {
        CoreError::NotFound { entity, .. } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => internal(msg),
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - Unique violations on `uq_`-prefixed constraints map to 409.
/// - Dangling references map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_store_error(err: &StoreError) -> ErrorParts {
    match err {
        StoreError::Duplicate { constraint } if constraint.starts_with("uq_") => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Duplicate value violates unique constraint: {constraint}"),
        ),
        StoreError::ForeignKey { .. } => (
            StatusCode::CONFLICT,
            "CONFLICT",
            "Referenced resource no longer exists".to_string(),
        ),
        other => internal(other),
    }
}

fn internal(detail: &dyn std::fmt::Display) -> ErrorParts {
    tracing::error!(error = %detail, "Internal error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
