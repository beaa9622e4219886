//! Chirp entity model and DTOs.

use chirpy_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A chirp row from the `chirps` table. Safe to serialize as-is.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Chirp {
    pub id: DbId,
    pub body: String,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a chirp. `body` must already be moderated and
/// `user_id` must come from a validated access token.
#[derive(Debug, Clone)]
pub struct CreateChirp {
    pub body: String,
    pub user_id: DbId,
}

/// Ordering of chirp listings by creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Filter for [`crate::Store::list_chirps`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ChirpQuery {
    /// Restrict to chirps by this author.
    pub author_id: Option<DbId>,
    pub order: SortOrder,
}
