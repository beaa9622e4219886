//! Authentication and authorization primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- Stateless JWT access-token issuance and validation.
//! - [`refresh`] -- Persisted refresh-token lifecycle.
//! - [`guard`] -- Bearer extraction, access-token requirement, ownership checks.

pub mod guard;
pub mod jwt;
pub mod password;
pub mod refresh;
