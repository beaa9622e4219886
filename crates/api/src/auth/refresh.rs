//! Refresh-token lifecycle: generate, persist, look up, revoke, exchange.
//!
//! Refresh tokens are opaque random strings that always go through the
//! [`Store`]. Exchanging one mints a new access token but leaves the refresh
//! token itself untouched; it stays usable until it expires or is revoked.

use chirpy_core::types::{DbId, Timestamp};
use chirpy_db::models::refresh_token::{CreateRefreshToken, RefreshToken};
use chirpy_db::{Store, StoreError};
use chrono::Utc;
use rand::RngCore;

use super::jwt::{issue_access_token_at, JwtConfig, TokenError};

/// Number of random bytes in a refresh token (hex-encoded to twice as many chars).
const REFRESH_TOKEN_BYTES: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("refresh token not found")]
    NotFound,

    #[error("refresh token has been revoked")]
    Revoked,

    #[error("refresh token has expired")]
    Expired,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Generate a new opaque refresh token: 32 random bytes as lowercase hex.
///
/// The output is URL-safe and never contains a `.`, so it cannot be
/// mistaken for a JWT.
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Generate and persist a refresh token for `user_id`.
pub async fn create_refresh_token(
    store: &dyn Store,
    user_id: DbId,
    config: &JwtConfig,
) -> Result<RefreshToken, RefreshError> {
    let input = CreateRefreshToken {
        token: generate_refresh_token(),
        user_id,
        expires_at: Utc::now() + config.refresh_token_ttl(),
    };
    let record = store.create_refresh_token(&input).await?;
    tracing::debug!(user_id = %user_id, expires_at = %record.expires_at, "Refresh token created");
    Ok(record)
}

/// Resolve a token to its stored record, revoked or not.
pub async fn lookup_refresh_token(
    store: &dyn Store,
    token: &str,
) -> Result<RefreshToken, RefreshError> {
    store
        .find_refresh_token(token)
        .await?
        .ok_or(RefreshError::NotFound)
}

/// Revoke a token. Revoking an already-revoked token succeeds.
pub async fn revoke_refresh_token(store: &dyn Store, token: &str) -> Result<(), RefreshError> {
    if store.revoke_refresh_token(token, Utc::now()).await? {
        Ok(())
    } else {
        Err(RefreshError::NotFound)
    }
}

/// Exchange a refresh token for a new access token.
pub async fn exchange_refresh_token(
    store: &dyn Store,
    token: &str,
    config: &JwtConfig,
) -> Result<String, RefreshError> {
    exchange_refresh_token_at(store, token, config, Utc::now()).await
}

/// [`exchange_refresh_token`] evaluated at `now`.
///
/// Revocation is checked before expiry, so a token that is both reports
/// [`RefreshError::Revoked`].
pub async fn exchange_refresh_token_at(
    store: &dyn Store,
    token: &str,
    config: &JwtConfig,
    now: Timestamp,
) -> Result<String, RefreshError> {
    let record = lookup_refresh_token(store, token).await?;

    if record.is_revoked() {
        return Err(RefreshError::Revoked);
    }
    if record.is_expired_at(now) {
        return Err(RefreshError::Expired);
    }

    let access_token =
        issue_access_token_at(record.user_id, &config.secret, config.access_token_ttl(), now)?;
    Ok(access_token)
}
