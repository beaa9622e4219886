//! Persistence seam used by the API.
//!
//! Handlers hold an `Arc<dyn Store>` so the same code runs against Postgres
//! ([`PgStore`]) or the in-process [`MemoryStore`]. Every method performs a
//! single logical operation; row-level atomicity is the implementation's job.

mod memory;
mod postgres;

use async_trait::async_trait;
use chirpy_core::types::{DbId, Timestamp};

use crate::models::chirp::{Chirp, ChirpQuery, CreateChirp};
use crate::models::refresh_token::{CreateRefreshToken, RefreshToken};
use crate::models::user::{CreateUser, UpdateCredentials, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Failure reported by a [`Store`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("Duplicate value violates unique constraint: {constraint}")]
    Duplicate { constraint: String },

    /// A write referenced a row that does not exist (e.g. a chirp for a
    /// user removed by an administrative reset).
    #[error("Missing referenced row for constraint: {constraint}")]
    ForeignKey { constraint: String },

    /// Any other database failure. The message may contain internal detail
    /// and must not be shown to clients.
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => return StoreError::Duplicate { constraint },
                Some(FOREIGN_KEY_VIOLATION) => return StoreError::ForeignKey { constraint },
                _ => {}
            }
        }
        StoreError::Database(err)
    }
}

/// All persistence operations the service needs.
#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap connectivity probe.
    async fn health_check(&self) -> Result<(), StoreError>;

    // --- users ---

    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError>;
    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    /// Returns `None` if the user does not exist.
    async fn update_user_credentials(
        &self,
        id: DbId,
        input: &UpdateCredentials,
    ) -> Result<Option<User>, StoreError>;
    /// Administrative reset: remove every user along with their chirps and
    /// refresh tokens. Returns the number of users removed.
    async fn delete_all_users(&self) -> Result<u64, StoreError>;

    // --- chirps ---

    async fn create_chirp(&self, input: &CreateChirp) -> Result<Chirp, StoreError>;
    async fn find_chirp(&self, id: DbId) -> Result<Option<Chirp>, StoreError>;
    async fn list_chirps(&self, query: &ChirpQuery) -> Result<Vec<Chirp>, StoreError>;
    /// Returns `false` if no chirp with that id existed.
    async fn delete_chirp(&self, id: DbId) -> Result<bool, StoreError>;

    // --- refresh tokens ---

    async fn create_refresh_token(
        &self,
        input: &CreateRefreshToken,
    ) -> Result<RefreshToken, StoreError>;
    /// Returns the record whether or not it is revoked or expired.
    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>, StoreError>;
    /// Set `revoked_at` if not already set. Returns `false` if the token does
    /// not exist; revoking an already-revoked token returns `true`.
    async fn revoke_refresh_token(&self, token: &str, at: Timestamp) -> Result<bool, StoreError>;
}
