//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod chirp_repo;
pub mod refresh_token_repo;
pub mod user_repo;

pub use chirp_repo::ChirpRepo;
pub use refresh_token_repo::RefreshTokenRepo;
pub use user_repo::UserRepo;
