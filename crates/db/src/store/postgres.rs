use async_trait::async_trait;
use chirpy_core::types::{DbId, Timestamp};

use super::{Store, StoreError};
use crate::models::chirp::{Chirp, ChirpQuery, CreateChirp};
use crate::models::refresh_token::{CreateRefreshToken, RefreshToken};
use crate::models::user::{CreateUser, UpdateCredentials, User};
use crate::repositories::{ChirpRepo, RefreshTokenRepo, UserRepo};
use crate::DbPool;

/// [`Store`] backed by PostgreSQL through the repository layer.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }

    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        Ok(UserRepo::create(&self.pool, input).await?)
    }

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn update_user_credentials(
        &self,
        id: DbId,
        input: &UpdateCredentials,
    ) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::update_credentials(&self.pool, id, input).await?)
    }

    async fn delete_all_users(&self) -> Result<u64, StoreError> {
        let deleted = UserRepo::delete_all(&self.pool).await?;
        tracing::debug!(deleted, "Deleted all users");
        Ok(deleted)
    }

    async fn create_chirp(&self, input: &CreateChirp) -> Result<Chirp, StoreError> {
        Ok(ChirpRepo::create(&self.pool, input).await?)
    }

    async fn find_chirp(&self, id: DbId) -> Result<Option<Chirp>, StoreError> {
        Ok(ChirpRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_chirps(&self, query: &ChirpQuery) -> Result<Vec<Chirp>, StoreError> {
        Ok(ChirpRepo::list(&self.pool, query).await?)
    }

    async fn delete_chirp(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(ChirpRepo::delete(&self.pool, id).await?)
    }

    async fn create_refresh_token(
        &self,
        input: &CreateRefreshToken,
    ) -> Result<RefreshToken, StoreError> {
        Ok(RefreshTokenRepo::create(&self.pool, input).await?)
    }

    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>, StoreError> {
        Ok(RefreshTokenRepo::find(&self.pool, token).await?)
    }

    async fn revoke_refresh_token(&self, token: &str, at: Timestamp) -> Result<bool, StoreError> {
        Ok(RefreshTokenRepo::revoke(&self.pool, token, at).await?)
    }
}
