//! Chirp body moderation: a length ceiling plus whole-word profanity masking.
//!
//! Pure logic, no I/O. The banned-word list is injected so it can be changed
//! through configuration.

use std::collections::HashSet;

/// Maximum chirp length, in characters of the raw (unredacted) body.
pub const MAX_CHIRP_LENGTH: usize = 140;

/// Replacement written in place of a banned word.
pub const MASK: &str = "****";

/// Words masked when no override is configured.
pub const DEFAULT_BANNED_WORDS: &[&str] = &["kerfuffle", "sharbert", "fornax"];

/// Reasons a chirp body is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModerationError {
    #[error("Chirp is too long ({length} characters, maximum is {max})")]
    TooLong { length: usize, max: usize },
}

/// Validates and redacts chirp bodies.
#[derive(Debug, Clone)]
pub struct ChirpFilter {
    /// Lowercased banned words.
    banned: HashSet<String>,
    max_length: usize,
}

impl Default for ChirpFilter {
    fn default() -> Self {
        Self::new(DEFAULT_BANNED_WORDS.iter().copied())
    }
}

impl ChirpFilter {
    /// Build a filter from a banned-word list. Matching is case-insensitive,
    /// so entries are lowercased on the way in. Blank entries are ignored.
    pub fn new<I, S>(banned: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let banned = banned
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        Self {
            banned,
            max_length: MAX_CHIRP_LENGTH,
        }
    }

    /// Parse a comma-separated word list (the `BANNED_WORDS` env format).
    pub fn from_csv(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// Check the length ceiling, then mask banned words.
    ///
    /// The body is split on whitespace and rejoined with single spaces, so
    /// runs of whitespace collapse and leading/trailing whitespace is dropped.
    pub fn validate(&self, body: &str) -> Result<String, ModerationError> {
        let length = body.chars().count();
        if length > self.max_length {
            return Err(ModerationError::TooLong {
                length,
                max: self.max_length,
            });
        }

        Ok(self.redact(body))
    }

    /// Mask banned words without checking length.
    pub fn redact(&self, body: &str) -> String {
        body.split_whitespace()
            .map(|word| {
                if self.banned.contains(&word.to_lowercase()) {
                    MASK
                } else {
                    word
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
