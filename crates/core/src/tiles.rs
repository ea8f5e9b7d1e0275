//! Letter tiles and answer slots for one word.
//!
//! Both rows are fixed-capacity arrays with `None` as the empty sentinel. A
//! letter is always in exactly one place: either still on a tile or sitting
//! in an answer slot.

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;
use crate::types::MAX_WORD_LEN;

pub type LetterRow = ArrayVec<Option<char>, MAX_WORD_LEN>;

/// Result of placing a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Index out of range, tile already used, or no empty slot left.
    Ignored,
    /// Letter moved into a slot; the answer is not complete yet.
    Placed,
    /// Letter moved into the last empty slot.
    Completed { matches: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRack {
    answer: ArrayVec<char, MAX_WORD_LEN>,
    slots: LetterRow,
    tiles: LetterRow,
}

impl TileRack {
    /// Build a rack for `answer` with freshly shuffled tiles.
    ///
    /// Returns `None` for an empty answer or one longer than [`MAX_WORD_LEN`].
    pub fn new(answer: &str, rng: &mut SimpleRng) -> Option<Self> {
        let mut letters: ArrayVec<char, MAX_WORD_LEN> = ArrayVec::new();
        for c in answer.chars() {
            letters.try_push(c).ok()?;
        }
        if letters.is_empty() {
            return None;
        }

        let mut rack = Self {
            slots: letters.iter().map(|_| None).collect(),
            tiles: LetterRow::new(),
            answer: letters,
        };
        rack.reshuffle(rng);
        Some(rack)
    }

    pub fn len(&self) -> usize {
        self.answer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answer.is_empty()
    }

    pub fn answer(&self) -> String {
        self.answer.iter().collect()
    }

    pub fn slots(&self) -> &[Option<char>] {
        &self.slots
    }

    pub fn tiles(&self) -> &[Option<char>] {
        &self.tiles
    }

    pub fn filled_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn remaining_tiles(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Letters currently in the answer slots, in slot order.
    pub fn attempt(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    /// Clear every slot and deal a fresh shuffle of the whole word.
    pub fn reshuffle(&mut self, rng: &mut SimpleRng) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.tiles.clear();
        self.tiles.extend(self.answer.iter().map(|&c| Some(c)));
        rng.shuffle(&mut self.tiles);
    }

    /// Move tile `tile_index` into the first empty slot.
    pub fn place(&mut self, tile_index: usize) -> Placement {
        let Some(letter) = self.tiles.get(tile_index).copied().flatten() else {
            return Placement::Ignored;
        };
        let Some(slot) = self.slots.iter().position(Option::is_none) else {
            return Placement::Ignored;
        };

        self.slots[slot] = Some(letter);
        self.tiles[tile_index] = None;

        if self.is_complete() {
            let matches = self.slots.iter().flatten().eq(self.answer.iter());
            Placement::Completed { matches }
        } else {
            Placement::Placed
        }
    }

    /// Move the letter in `slot_index` back to the first empty tile.
    pub fn recall(&mut self, slot_index: usize) -> bool {
        let Some(letter) = self.slots.get(slot_index).copied().flatten() else {
            return false;
        };
        let Some(tile) = self.tiles.iter().position(Option::is_none) else {
            return false;
        };

        self.tiles[tile] = Some(letter);
        self.slots[slot_index] = None;
        true
    }

    /// First unused tile holding `letter`.
    pub fn find_tile(&self, letter: char) -> Option<usize> {
        self.tiles.iter().position(|t| *t == Some(letter))
    }

    /// Highest-index filled slot.
    pub fn last_filled_slot(&self) -> Option<usize> {
        self.slots.iter().rposition(Option::is_some)
    }

    /// Every letter accounted for exactly once across slots and tiles.
    pub fn conserves_letters(&self) -> bool {
        if self.filled_slots() + self.remaining_tiles() != self.len() {
            return false;
        }
        let mut held: ArrayVec<char, MAX_WORD_LEN> =
            self.slots.iter().chain(self.tiles.iter()).flatten().copied().collect();
        let mut expected = self.answer.clone();
        held.sort_unstable();
        expected.sort_unstable();
        held == expected
    }
}
