//! Per-word star ratings.
//!
//! The engine never writes ratings itself; it emits a [`ProgressIntent`] and
//! the host applies it to whatever store it owns. [`ProgressBook`] is the
//! in-memory store used by the session and tests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{Word, FULL_STAR_THRESHOLD, MAX_STAR_RATING, RESET_STAR_RATING};

/// Requested change to one word's star rating.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "word_id", rename_all = "camelCase")]
pub enum ProgressIntent {
    /// Correct answer: one more star, capped at [`MAX_STAR_RATING`].
    Increment(String),
    /// Failed word: back to [`RESET_STAR_RATING`].
    Reset(String),
}

impl ProgressIntent {
    pub fn word_id(&self) -> &str {
        match self {
            ProgressIntent::Increment(id) | ProgressIntent::Reset(id) => id,
        }
    }

    /// Rating after applying this intent to `current`.
    pub fn apply_to(&self, current: u8) -> u8 {
        match self {
            ProgressIntent::Increment(_) => current.saturating_add(1).min(MAX_STAR_RATING),
            ProgressIntent::Reset(_) => RESET_STAR_RATING,
        }
    }
}

/// Star ratings for one user, keyed by word id. Missing words rate 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressBook {
    #[serde(default)]
    ratings: HashMap<String, u8>,
}

impl ProgressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rating(&self, word_id: &str) -> u8 {
        self.ratings.get(word_id).copied().unwrap_or(0)
    }

    /// Set a rating, clamped to `0..=MAX_STAR_RATING`.
    pub fn set_rating(&mut self, word_id: impl Into<String>, rating: u8) {
        self.ratings
            .insert(word_id.into(), rating.min(MAX_STAR_RATING));
    }

    /// Apply an intent and return the new rating.
    pub fn apply(&mut self, intent: &ProgressIntent) -> u8 {
        let next = intent.apply_to(self.rating(intent.word_id()));
        self.ratings.insert(intent.word_id().to_string(), next);
        log::debug!(
            "progress: word {} -> {} stars ({:?})",
            intent.word_id(),
            next,
            intent
        );
        next
    }

    pub fn is_mastered(&self, word_id: &str) -> bool {
        self.rating(word_id) >= FULL_STAR_THRESHOLD
    }

    /// Number of `words` at or above the mastery threshold.
    pub fn mastered_count<'a>(&self, words: impl IntoIterator<Item = &'a Word>) -> u32 {
        words
            .into_iter()
            .filter(|w| self.is_mastered(&w.id))
            .count() as u32
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.ratings.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
