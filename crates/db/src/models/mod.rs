pub mod chirp;
pub mod refresh_token;
pub mod user;
