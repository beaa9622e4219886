//! Argon2id password hashing and verification.
//!
//! Hashes use a fresh random salt per call and are stored in PHC string
//! format, so the algorithm parameters and salt travel with the hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Failure from [`verify_password`] or [`hash_password`].
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// The plaintext does not match the stored hash. Callers map this to an
    /// authentication failure.
    #[error("password does not match")]
    Mismatch,

    /// The stored hash is unparseable or hashing itself failed. This is a
    /// system failure, not a bad credential.
    #[error("password hashing error: {0}")]
    Hash(argon2::password_hash::Error),
}

/// Hash a plaintext password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(PasswordError::Hash)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted hash.
///
/// The comparison inside `argon2` is constant-time.
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(PasswordError::Hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(()),
        Err(argon2::password_hash::Error::Password) => Err(PasswordError::Mismatch),
        Err(e) => Err(PasswordError::Hash(e)),
    }
}
