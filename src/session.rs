//! A play session over one package.
//!
//! The session feeds words from a shuffled queue into a [`GameEngine`], folds
//! the engine's progress intents into a [`ProgressBook`], and keeps running
//! totals. It ends when the queue runs dry or the stack fills up.

use std::collections::VecDeque;
use std::mem;

use serde::Serialize;

use crate::core::{
    ConfigError, EngineConfig, GameEngine, ProgressBook, RoundEvent, RoundSnapshot, SimpleRng,
};
use crate::types::{Package, TileAction, Word};

/// Pause between a word's outcome and the next word.
pub const NEXT_WORD_DELAY_MS: u32 = 800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionEnd {
    /// Every word in the package was played.
    Completed,
    /// The stack filled up.
    RoundOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub total_xp: u32,
    pub correct: u32,
    pub wrong: u32,
    pub end: Option<SessionEnd>,
}

#[derive(Debug)]
pub struct RoundSession {
    engine: GameEngine<Vec<RoundEvent>>,
    package_id: String,
    package_name: String,
    words: Vec<Word>,
    rng: SimpleRng,
    queue: VecDeque<Word>,
    book: ProgressBook,
    total_xp: u32,
    correct: u32,
    wrong: u32,
    next_word_in_ms: Option<u32>,
    end: Option<SessionEnd>,
}

impl RoundSession {
    /// Shuffle `package`'s words with `seed` and present the first one.
    pub fn new(
        config: EngineConfig,
        package: &Package,
        book: ProgressBook,
        seed: u32,
    ) -> Result<Self, ConfigError> {
        let mut rng = SimpleRng::new(seed);
        let engine = GameEngine::new(config, rng.next_u32(), Vec::new())?;
        let mut session = Self {
            engine,
            package_id: package.id.clone(),
            package_name: package.name.clone(),
            words: package.words.clone(),
            rng,
            queue: VecDeque::new(),
            book,
            total_xp: 0,
            correct: 0,
            wrong: 0,
            next_word_in_ms: None,
            end: None,
        };
        session.deal();
        log::info!(
            "session started: package {} ({} words, {})",
            session.package_id,
            session.queue.len(),
            config.difficulty.as_str()
        );
        session.start_next_word();
        Ok(session)
    }

    /// Clear the round and totals, reshuffle the package and start over.
    /// Star ratings earned so far are kept.
    pub fn restart(&mut self) {
        self.engine.restart();
        self.engine.observer_mut().clear();
        self.total_xp = 0;
        self.correct = 0;
        self.wrong = 0;
        self.next_word_in_ms = None;
        self.end = None;
        self.deal();
        log::info!("session restarted: package {}", self.package_id);
        self.start_next_word();
    }

    fn deal(&mut self) {
        let mut words = self.words.clone();
        self.rng.shuffle(&mut words);
        self.queue = words.into();
    }

    pub fn engine(&self) -> &GameEngine<Vec<RoundEvent>> {
        &self.engine
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        self.engine.snapshot()
    }

    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn book(&self) -> &ProgressBook {
        &self.book
    }

    pub fn into_book(self) -> ProgressBook {
        self.book
    }

    /// Words not yet presented.
    pub fn words_left(&self) -> usize {
        self.queue.len()
    }

    pub fn total_xp(&self) -> u32 {
        self.total_xp
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn wrong(&self) -> u32 {
        self.wrong
    }

    pub fn end(&self) -> Option<SessionEnd> {
        self.end
    }

    pub fn is_finished(&self) -> bool {
        self.end.is_some()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            total_xp: self.total_xp,
            correct: self.correct,
            wrong: self.wrong,
            end: self.end,
        }
    }

    pub fn apply_action(&mut self, action: TileAction) -> bool {
        if self.is_finished() {
            return false;
        }
        let handled = self.engine.apply_action(action);
        self.drain_events();
        handled
    }

    /// Advance the engine clock and present the next word when its pause ends.
    pub fn advance(&mut self, elapsed_ms: u32) {
        if self.is_finished() {
            return;
        }

        let pending = self.next_word_in_ms.take();
        self.engine.advance(elapsed_ms);
        self.drain_events();

        if self.is_finished() || self.next_word_in_ms.is_some() {
            return;
        }
        if let Some(remaining) = pending {
            let remaining = remaining.saturating_sub(elapsed_ms);
            if remaining == 0 {
                self.start_next_word();
            } else {
                self.next_word_in_ms = Some(remaining);
            }
        }
    }

    fn drain_events(&mut self) {
        for event in mem::take(self.engine.observer_mut()) {
            match event {
                RoundEvent::Progress { intent } => {
                    self.book.apply(&intent);
                }
                RoundEvent::Correct { xp, .. } => {
                    self.total_xp = self.total_xp.saturating_add(xp);
                    self.correct += 1;
                    self.next_word_in_ms = Some(NEXT_WORD_DELAY_MS);
                }
                RoundEvent::Wrong { .. } => {
                    self.wrong += 1;
                    self.next_word_in_ms = Some(NEXT_WORD_DELAY_MS);
                }
                RoundEvent::RoundOver { .. } => {
                    self.wrong += 1;
                    self.finish(SessionEnd::RoundOver);
                }
            }
        }
    }

    fn start_next_word(&mut self) {
        while let Some(word) = self.queue.pop_front() {
            if self.engine.start_word(&word) {
                return;
            }
            log::warn!("skipping word {}", word.id);
        }
        self.finish(SessionEnd::Completed);
    }

    fn finish(&mut self, end: SessionEnd) {
        if self.end.is_some() {
            return;
        }
        self.next_word_in_ms = None;
        self.end = Some(end);
        log::info!(
            "session {:?}: {} xp, {} correct, {} wrong",
            end,
            self.total_xp,
            self.correct,
            self.wrong
        );
    }
}
