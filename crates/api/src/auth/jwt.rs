//! JWT access-token issuance and validation.
//!
//! Access tokens are HS256-signed JWTs carrying a [`Claims`] payload. They
//! are validated from the signature and embedded expiry alone; no database
//! lookup is involved.

use chirpy_core::types::{DbId, Timestamp};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Value of the `iss` claim on every token this service issues.
pub const ISSUER: &str = "chirpy";

/// Access token lifetime. Fixed; clients cannot negotiate it.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 3600;

/// Default refresh token lifetime in days.
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 60;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub iss: String,
    /// Subject -- the user's id.
    pub sub: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Unique token identifier, so two tokens issued in the same second differ.
    pub jti: String,
}

/// Why an access token was rejected (or could not be produced).
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Not three dot-separated segments, undecodable, wrong algorithm or
    /// issuer, or missing/invalid claims.
    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    /// Signing failed while issuing a token.
    #[error("token encoding failed: {0}")]
    Encoding(jsonwebtoken::errors::Error),
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in seconds.
    pub access_token_ttl_secs: i64,
    /// Refresh token lifetime in days (default: 60).
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                      | Required | Default |
    /// |------------------------------|----------|---------|
    /// | `JWT_SECRET`                 | **yes**  | --      |
    /// | `REFRESH_TOKEN_EXPIRY_DAYS`  | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let refresh_token_expiry_days: i64 = std::env::var("REFRESH_TOKEN_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRY_DAYS.to_string())
            .parse()
            .expect("REFRESH_TOKEN_EXPIRY_DAYS must be a valid i64");

        Self::new(secret, refresh_token_expiry_days)
    }

    pub fn new(secret: impl Into<String>, refresh_token_expiry_days: i64) -> Self {
        Self {
            secret: secret.into(),
            access_token_ttl_secs: ACCESS_TOKEN_TTL_SECS,
            refresh_token_expiry_days,
        }
    }

    pub fn access_token_ttl(&self) -> Duration {
        Duration::seconds(self.access_token_ttl_secs)
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::days(self.refresh_token_expiry_days)
    }
}

/// Whether `token` has the compact JWS shape: three non-empty,
/// dot-separated segments. Opaque refresh tokens never do.
pub fn has_jwt_shape(token: &str) -> bool {
    let segments: Vec<&str> = token.split('.').collect();
    segments.len() == 3 && segments.iter().all(|s| !s.is_empty())
}

/// Issue an HS256 access token for `user_id`, valid for `ttl` from now.
pub fn issue_access_token(
    user_id: DbId,
    secret: &str,
    ttl: Duration,
) -> Result<String, TokenError> {
    issue_access_token_at(user_id, secret, ttl, Utc::now())
}

/// [`issue_access_token`] with an explicit issue time.
pub fn issue_access_token_at(
    user_id: DbId,
    secret: &str,
    ttl: Duration,
    issued_at: Timestamp,
) -> Result<String, TokenError> {
    let iat = issued_at.timestamp();
    let claims = Claims {
        iss: ISSUER.to_string(),
        sub: user_id.to_string(),
        iat,
        exp: iat + ttl.num_seconds(),
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(TokenError::Encoding)
}

/// Validate an access token and return the user id it was issued for.
pub fn validate_access_token(token: &str, secret: &str) -> Result<DbId, TokenError> {
    validate_access_token_at(token, secret, Utc::now())
}

/// [`validate_access_token`] evaluated at `now`.
///
/// A token is expired once `now` is strictly past `exp`; no leeway applies.
pub fn validate_access_token_at(
    token: &str,
    secret: &str,
    now: Timestamp,
) -> Result<DbId, TokenError> {
    if !has_jwt_shape(token) {
        return Err(TokenError::Malformed);
    }

    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked below against `now` rather than the system clock.
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_issuer(&[ISSUER]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    })?
    .claims;

    if now.timestamp() > claims.exp {
        return Err(TokenError::Expired);
    }

    Uuid::parse_str(&claims.sub).map_err(|_| TokenError::Malformed)
}
