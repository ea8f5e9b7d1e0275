//! Engine configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{
    Difficulty, DEFAULT_GRID_HEIGHT, DEFAULT_MAX_WRONG_WORDS, TIME_PER_LETTER_HARD_MS,
    TIME_PER_LETTER_MS,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid height must be at least 1")]
    EmptyGrid,
    #[error("max wrong words must be at least 1")]
    NoWrongWords,
    #[error("max wrong words ({max_wrong_words}) exceeds grid height ({grid_height})")]
    StackTallerThanGrid { grid_height: u8, max_wrong_words: u8 },
    #[error("time per letter must be positive")]
    ZeroTimePerLetter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub grid_height: u8,
    pub max_wrong_words: u8,
    pub time_per_letter_normal_ms: u32,
    pub time_per_letter_hard_ms: u32,
    pub difficulty: Difficulty,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_height: DEFAULT_GRID_HEIGHT,
            max_wrong_words: DEFAULT_MAX_WRONG_WORDS,
            time_per_letter_normal_ms: TIME_PER_LETTER_MS,
            time_per_letter_hard_ms: TIME_PER_LETTER_HARD_MS,
            difficulty: Difficulty::Normal,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables.
    ///
    /// Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let grid_height = env::var("WORDFALL_GRID_HEIGHT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.grid_height);

        let max_wrong_words = env::var("WORDFALL_MAX_WRONG")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_wrong_words);

        let time_per_letter_normal_ms = env::var("WORDFALL_TIME_PER_LETTER_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.time_per_letter_normal_ms);

        let time_per_letter_hard_ms = env::var("WORDFALL_TIME_PER_LETTER_HARD_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.time_per_letter_hard_ms);

        let hard = env::var("WORDFALL_HARD")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Self {
            grid_height,
            max_wrong_words,
            time_per_letter_normal_ms,
            time_per_letter_hard_ms,
            difficulty: if hard { Difficulty::Hard } else { Difficulty::Normal },
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Fall time per letter for the configured difficulty.
    pub fn time_per_letter_ms(&self) -> u32 {
        match self.difficulty {
            Difficulty::Normal => self.time_per_letter_normal_ms,
            Difficulty::Hard => self.time_per_letter_hard_ms,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.max_wrong_words == 0 {
            return Err(ConfigError::NoWrongWords);
        }
        if self.max_wrong_words > self.grid_height {
            return Err(ConfigError::StackTallerThanGrid {
                grid_height: self.grid_height,
                max_wrong_words: self.max_wrong_words,
            });
        }
        if self.time_per_letter_normal_ms == 0 || self.time_per_letter_hard_ms == 0 {
            return Err(ConfigError::ZeroTimePerLetter);
        }
        Ok(())
    }
}
