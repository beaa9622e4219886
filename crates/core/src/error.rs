//! Domain error taxonomy shared by every crate in the workspace.
//!
//! Each variant maps to exactly one HTTP status at the API boundary; see
//! `chirpy_api::error::AppError` for the mapping.

/// Domain-level failure.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The referenced entity does not exist. `id` is the identifier as the
    /// caller supplied it (a UUID for users and chirps, an opaque string for
    /// refresh tokens).
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Malformed or out-of-bounds input.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Input conflicts with existing state (e.g. a duplicate email).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Credentials or token were missing, invalid, expired, or revoked.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but does not own the resource.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
