//! Read-only view of a round for renderers and observers.

use serde::{Deserialize, Serialize};

use crate::engine::RoundPhase;
use crate::types::Difficulty;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    /// Text on the falling word (answer in normal mode, translation in hard mode).
    pub prompt: Option<String>,
    pub word_id: Option<String>,
    pub answer_slots: Vec<Option<char>>,
    pub scrambled_tiles: Vec<Option<char>>,
    pub falling_position: u8,
    pub max_position: u8,
    pub grid_height: u8,
    pub max_wrong_words: u8,
    /// Prompts of the stacked words, oldest (bottom row) first.
    pub stacked_words: Vec<String>,
    pub phase: RoundPhase,
    pub is_animating: bool,
    /// A wrong arrangement is on screen and about to be cleared.
    pub retry_pending: bool,
    pub score: u32,
    pub combo: u32,
    pub difficulty: Difficulty,
    pub fall_interval_ms: u32,
}

impl RoundSnapshot {
    pub fn playable(&self) -> bool {
        self.is_animating && !self.retry_pending
    }

    /// Grid row (0 = top) of the `index`th stacked word.
    pub fn stacked_row(&self, index: usize) -> Option<u8> {
        if index >= self.stacked_words.len() {
            return None;
        }
        (self.grid_height as usize)
            .checked_sub(index + 1)
            .map(|row| row as u8)
    }
}

impl Default for RoundSnapshot {
    fn default() -> Self {
        Self {
            prompt: None,
            word_id: None,
            answer_slots: Vec::new(),
            scrambled_tiles: Vec::new(),
            falling_position: 0,
            max_position: 0,
            grid_height: 0,
            max_wrong_words: 0,
            stacked_words: Vec::new(),
            phase: RoundPhase::Idle,
            is_animating: false,
            retry_pending: false,
            score: 0,
            combo: 1,
            difficulty: Difficulty::Normal,
            fall_interval_ms: 0,
        }
    }
}
