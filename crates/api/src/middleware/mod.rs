//! Request extractors and middleware.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT access token.
//! - [`auth::BearerToken`] -- Extracts a raw bearer token (refresh endpoints).
//! - [`hits::count_hits`] -- Counts static file-server requests.

pub mod auth;
pub mod hits;
