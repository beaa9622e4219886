//! Repository for the `chirps` table.

use chirpy_core::types::DbId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::chirp::{Chirp, ChirpQuery, CreateChirp};

const COLUMNS: &str = "id, body, user_id, created_at, updated_at";

/// Provides CRUD operations for chirps.
pub struct ChirpRepo;

impl ChirpRepo {
    pub async fn create(pool: &PgPool, input: &CreateChirp) -> Result<Chirp, sqlx::Error> {
        let query = format!(
            "INSERT INTO chirps (id, body, user_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Chirp>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.body)
            .bind(input.user_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Chirp>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chirps WHERE id = $1");
        sqlx::query_as::<_, Chirp>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List chirps ordered by creation time, optionally restricted to one author.
    ///
    /// Chirps with equal `created_at` keep insertion order (`seq`).
    pub async fn list(pool: &PgPool, filter: &ChirpQuery) -> Result<Vec<Chirp>, sqlx::Error> {
        let order = filter.order.as_sql();
        let query = format!(
            "SELECT {COLUMNS} FROM chirps
             WHERE ($1::uuid IS NULL OR user_id = $1)
             ORDER BY created_at {order}, seq {order}"
        );
        sqlx::query_as::<_, Chirp>(&query)
            .bind(filter.author_id)
            .fetch_all(pool)
            .await
    }

    /// Hard-delete a chirp. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM chirps WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
