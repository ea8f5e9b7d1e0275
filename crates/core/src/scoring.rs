//! Scoring module - XP awards and the combo chain
//!
//! The combo starts at 1, grows by one per correct word and drops back to 1
//! on any failed word. XP is computed from the combo *before* the increment.

use crate::types::{
    Difficulty, RoundOutcome, XP_BASE, XP_BASE_HARD, XP_COMBO_CAP, XP_COMBO_CAP_HARD,
    XP_COMBO_STEP, XP_COMBO_STEP_HARD,
};

/// Combo value at the start of a round and after any failure.
pub const INITIAL_COMBO: u32 = 1;

/// XP for a correct answer at `combo` (the pre-answer combo value).
///
/// ```
/// use wordfall_core::scoring::calculate_xp;
/// use wordfall_core::types::Difficulty;
///
/// assert_eq!(calculate_xp(3, Difficulty::Normal), 110);
/// assert_eq!(calculate_xp(50, Difficulty::Hard), 300);
/// ```
pub fn calculate_xp(combo: u32, difficulty: Difficulty) -> u32 {
    let (base, step, cap) = match difficulty {
        Difficulty::Normal => (XP_BASE, XP_COMBO_STEP, XP_COMBO_CAP),
        Difficulty::Hard => (XP_BASE_HARD, XP_COMBO_STEP_HARD, XP_COMBO_CAP_HARD),
    };
    let bonus = combo.saturating_sub(1).saturating_mul(step).min(cap);
    base + bonus
}

/// Highest XP a single answer can earn.
pub fn max_xp(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Normal => XP_BASE + XP_COMBO_CAP,
        Difficulty::Hard => XP_BASE_HARD + XP_COMBO_CAP_HARD,
    }
}

/// Combo after a word resolves with `outcome`.
pub fn next_combo(combo: u32, outcome: RoundOutcome) -> u32 {
    if outcome.resets_combo() {
        INITIAL_COMBO
    } else {
        combo.max(INITIAL_COMBO).saturating_add(1)
    }
}
