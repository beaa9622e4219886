//! Chirpy domain core: shared types, the error taxonomy, and chirp moderation.

pub mod error;
pub mod moderation;
pub mod types;
