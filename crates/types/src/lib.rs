//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no behaviour beyond small helpers, making them
//! usable in any context (core logic, terminal rendering, deck files).
//!
//! # Grid Dimensions
//!
//! A falling word drops down a single column of rows:
//!
//! - **Height**: 10 rows by default (indexed 0-9, row 0 at the top)
//! - **Stack ceiling**: 9 failed words end the round
//!
//! Each failed word stays on the bottom of the grid, shrinking the distance the
//! next word has to fall.
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host loop timestep (~60 FPS) |
//! | `TIME_PER_LETTER_MS` | 2000 | Fall time per letter in normal mode |
//! | `TIME_PER_LETTER_HARD_MS` | 4000 | Fall time per letter in hard mode |
//! | `WRONG_EMIT_DELAY_MS` | 300 | Pause before a WRONG outcome is reported |
//! | `ROUND_OVER_EMIT_DELAY_MS` | 500 | Pause before ROUND_OVER is reported |
//! | `MISMATCH_RESET_DELAY_MS` | 500 | Pause before a wrong arrangement is cleared |
//!
//! # Examples
//!
//! ```
//! use wordfall_types::{Difficulty, TileAction, Word, DEFAULT_GRID_HEIGHT};
//!
//! let word = Word::new("w1", "cat", "kedi", 1);
//! assert_eq!(word.answer(), "cat");
//!
//! // Hard mode shows the translation instead of the answer.
//! assert_eq!(Difficulty::Normal.prompt(&word), "cat");
//! assert_eq!(Difficulty::Hard.prompt(&word), "kedi");
//!
//! assert_eq!(TileAction::from_char('A'), Some(TileAction::Type('a')));
//! assert_eq!(DEFAULT_GRID_HEIGHT, 10);
//! ```

use serde::{Deserialize, Serialize};

/// Rows in the falling grid.
pub const DEFAULT_GRID_HEIGHT: u8 = 10;

/// Stacked (failed) words that end the round.
pub const DEFAULT_MAX_WRONG_WORDS: u8 = 9;

/// Longest answer the engine accepts (letters).
pub const MAX_WORD_LEN: usize = 32;

/// Host loop timestep in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Fall time per letter in normal mode.
pub const TIME_PER_LETTER_MS: u32 = 2000;

/// Fall time per letter in hard mode.
pub const TIME_PER_LETTER_HARD_MS: u32 = 4000;

/// Delay before a WRONG outcome is emitted.
pub const WRONG_EMIT_DELAY_MS: u32 = 300;

/// Delay before a ROUND_OVER outcome is emitted.
pub const ROUND_OVER_EMIT_DELAY_MS: u32 = 500;

/// Delay before a complete but wrong arrangement is cleared and reshuffled.
pub const MISMATCH_RESET_DELAY_MS: u32 = 500;

/// Base XP for a correct answer in normal mode.
pub const XP_BASE: u32 = 100;
/// Per-combo XP step in normal mode.
pub const XP_COMBO_STEP: u32 = 5;
/// Combo bonus cap in normal mode.
pub const XP_COMBO_CAP: u32 = 50;

/// Base XP for a correct answer in hard mode.
pub const XP_BASE_HARD: u32 = 200;
/// Per-combo XP step in hard mode.
pub const XP_COMBO_STEP_HARD: u32 = 10;
/// Combo bonus cap in hard mode.
pub const XP_COMBO_CAP_HARD: u32 = 100;

/// Highest star rating a word can hold.
pub const MAX_STAR_RATING: u8 = 5;

/// Star rating at which a word counts as mastered.
pub const FULL_STAR_THRESHOLD: u8 = 3;

/// Star rating a word falls back to after a wrong answer.
pub const RESET_STAR_RATING: u8 = 1;


/// An immutable vocabulary entry.
///
/// `english` is the word the player spells; `turkish` is its translation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
    pub id: String,
    pub english: String,
    pub turkish: String,
    #[serde(default)]
    pub level: u8,
}

impl Word {
    pub fn new(
        id: impl Into<String>,
        english: impl Into<String>,
        turkish: impl Into<String>,
        level: u8,
    ) -> Self {
        Self {
            id: id.into(),
            english: english.into(),
            turkish: turkish.into(),
            level,
        }
    }

    /// The letters the player has to arrange: lowercased, alphabetic only.
    pub fn answer(&self) -> String {
        self.english
            .chars()
            .filter(|c| c.is_alphabetic())
            .flat_map(char::to_lowercase)
            .collect()
    }
}

/// Ordering key for a word package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageRef {
    pub id: String,
    pub display_order: i32,
}

impl PartialOrd for PackageRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PackageRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.display_order
            .cmp(&other.display_order)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Game difficulty.
///
/// Hard mode doubles the time per letter and shows the translation
/// instead of the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Parse difficulty from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn is_hard(&self) -> bool {
        matches!(self, Difficulty::Hard)
    }

    /// Text displayed on the falling word.
    pub fn prompt<'a>(&self, word: &'a Word) -> &'a str {
        match self {
            Difficulty::Normal => &word.english,
            Difficulty::Hard => &word.turkish,
        }
    }
}

/// Player input against the letter tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileAction {
    /// Place the first unused tile holding this letter.
    Type(char),
    /// Recall the most recently filled answer slot.
    Backspace,
    /// Recall every filled answer slot.
    Clear,
}

impl TileAction {
    /// Map a typed character to a tile action (letters only, lowercased).
    pub fn from_char(c: char) -> Option<Self> {
        if !c.is_alphabetic() {
            return None;
        }
        c.to_lowercase().next().map(TileAction::Type)
    }
}

/// Terminal outcome of one falling word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundOutcome {
    Correct,
    Wrong,
    RoundOver,
}

impl RoundOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundOutcome::Correct => "correct",
            RoundOutcome::Wrong => "wrong",
            RoundOutcome::RoundOver => "roundOver",
        }
    }

    /// Whether this outcome breaks the combo chain.
    pub fn resets_combo(&self) -> bool {
        !matches!(self, RoundOutcome::Correct)
    }
}

/// A named, ordered group of words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub id: String,
    pub name: String,
    pub display_order: i32,
    #[serde(default)]
    pub words: Vec<Word>,
}

impl Package {
    pub fn package_ref(&self) -> PackageRef {
        PackageRef {
            id: self.id.clone(),
            display_order: self.display_order,
        }
    }
}
