use std::collections::HashMap;

use async_trait::async_trait;
use chirpy_core::types::{DbId, Timestamp};
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::chirp::{Chirp, ChirpQuery, CreateChirp, SortOrder};
use crate::models::refresh_token::{CreateRefreshToken, RefreshToken};
use crate::models::user::{CreateUser, UpdateCredentials, User};

const UQ_USERS_EMAIL: &str = "uq_users_email";
const FK_CHIRPS_USER: &str = "chirps_user_id_fkey";
const FK_REFRESH_TOKENS_USER: &str = "refresh_tokens_user_id_fkey";
const PK_REFRESH_TOKENS: &str = "refresh_tokens_pkey";

#[derive(Default)]
struct Tables {
    users: HashMap<DbId, User>,
    /// Insertion order doubles as creation order.
    chirps: Vec<Chirp>,
    refresh_tokens: HashMap<String, RefreshToken>,
}

/// In-process [`Store`] with the same constraints as the Postgres schema
/// (unique email, cascading user deletes, foreign keys on `user_id`).
///
/// Used by `STORE=memory` for local runs and by the HTTP integration tests.
/// A single lock guards all tables, so every operation is atomic.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == input.email) {
            return Err(StoreError::Duplicate {
                constraint: UQ_USERS_EMAIL.to_string(),
            });
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: input.email.clone(),
            hashed_password: input.hashed_password.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn update_user_credentials(
        &self,
        id: DbId,
        input: &UpdateCredentials,
    ) -> Result<Option<User>, StoreError> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|u| u.id != id && u.email == input.email)
        {
            return Err(StoreError::Duplicate {
                constraint: UQ_USERS_EMAIL.to_string(),
            });
        }

        let Some(user) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        user.email = input.email.clone();
        user.hashed_password = input.hashed_password.clone();
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete_all_users(&self) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        let deleted = tables.users.len() as u64;
        tables.users.clear();
        tables.chirps.clear();
        tables.refresh_tokens.clear();
        Ok(deleted)
    }

    async fn create_chirp(&self, input: &CreateChirp) -> Result<Chirp, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&input.user_id) {
            return Err(StoreError::ForeignKey {
                constraint: FK_CHIRPS_USER.to_string(),
            });
        }

        let now = Utc::now();
        let chirp = Chirp {
            id: Uuid::new_v4(),
            body: input.body.clone(),
            user_id: input.user_id,
            created_at: now,
            updated_at: now,
        };
        tables.chirps.push(chirp.clone());
        Ok(chirp)
    }

    async fn find_chirp(&self, id: DbId) -> Result<Option<Chirp>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.chirps.iter().find(|c| c.id == id).cloned())
    }

    async fn list_chirps(&self, query: &ChirpQuery) -> Result<Vec<Chirp>, StoreError> {
        let tables = self.tables.read().await;
        let mut chirps: Vec<Chirp> = tables
            .chirps
            .iter()
            .filter(|c| query.author_id.map_or(true, |author| c.user_id == author))
            .cloned()
            .collect();

        // Stable sort: equal timestamps keep insertion order, matching the
        // `seq` tie-break in Postgres.
        chirps.sort_by_key(|c| c.created_at);
        if query.order == SortOrder::Desc {
            chirps.reverse();
        }
        Ok(chirps)
    }

    async fn delete_chirp(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.chirps.len();
        tables.chirps.retain(|c| c.id != id);
        Ok(tables.chirps.len() < before)
    }

    async fn create_refresh_token(
        &self,
        input: &CreateRefreshToken,
    ) -> Result<RefreshToken, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&input.user_id) {
            return Err(StoreError::ForeignKey {
                constraint: FK_REFRESH_TOKENS_USER.to_string(),
            });
        }
        if tables.refresh_tokens.contains_key(&input.token) {
            return Err(StoreError::Duplicate {
                constraint: PK_REFRESH_TOKENS.to_string(),
            });
        }

        let now = Utc::now();
        let record = RefreshToken {
            token: input.token.clone(),
            user_id: input.user_id,
            created_at: now,
            updated_at: now,
            expires_at: input.expires_at,
            revoked_at: None,
        };
        tables
            .refresh_tokens
            .insert(record.token.clone(), record.clone());
        Ok(record)
    }

    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>, StoreError> {
        Ok(self.tables.read().await.refresh_tokens.get(token).cloned())
    }

    async fn revoke_refresh_token(&self, token: &str, at: Timestamp) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(record) = tables.refresh_tokens.get_mut(token) else {
            return Ok(false);
        };
        record.revoked_at.get_or_insert(at);
        record.updated_at = Utc::now();
        Ok(true)
    }
}
