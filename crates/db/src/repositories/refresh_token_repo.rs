//! Repository for the `refresh_tokens` table.

use chirpy_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::refresh_token::{CreateRefreshToken, RefreshToken};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "token, user_id, created_at, updated_at, expires_at, revoked_at";

/// Provides create/lookup/revoke for refresh tokens.
pub struct RefreshTokenRepo;

impl RefreshTokenRepo {
    /// Insert a new refresh token, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRefreshToken,
    ) -> Result<RefreshToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO refresh_tokens (token, user_id, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RefreshToken>(&query)
            .bind(&input.token)
            .bind(input.user_id)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a refresh token by its value, regardless of revocation or expiry.
    ///
    /// Callers decide what a revoked or expired record means.
    pub async fn find(pool: &PgPool, token: &str) -> Result<Option<RefreshToken>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM refresh_tokens WHERE token = $1");
        sqlx::query_as::<_, RefreshToken>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Mark a token revoked. An already-revoked token keeps its original
    /// `revoked_at`. Returns `false` only if the token does not exist.
    pub async fn revoke(pool: &PgPool, token: &str, at: Timestamp) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE refresh_tokens
             SET revoked_at = COALESCE(revoked_at, $2), updated_at = NOW()
             WHERE token = $1",
        )
        .bind(token)
        .bind(at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
