//! Falling-word engine - one word challenge at a time
//!
//! A word drops down a grid of `grid_height` rows while the player arranges its
//! shuffled letters. Each word resolves exactly once, into one of:
//!
//! - **Correct**: the slots spell the word. Reported immediately with XP.
//! - **Wrong**: the word reached the bottom. It joins the stack, and after
//!   [`WRONG_EMIT_DELAY_MS`] the host is told.
//! - **Round over**: the word reached the bottom and the stack is now full.
//!   Reported after [`ROUND_OVER_EMIT_DELAY_MS`]. No more words start until
//!   [`GameEngine::restart`].
//!
//! A complete but wrong arrangement is not an outcome: after
//! [`MISMATCH_RESET_DELAY_MS`] the slots clear and the letters are dealt again.
//!
//! # Timing
//!
//! The word falls `len × time_per_letter` milliseconds in total, one row every
//! `fall_duration / max_position`, where `max_position` is the grid height
//! minus the stacked words. All timers live in a [`TimerQueue`] owned by the
//! engine and driven by [`GameEngine::advance`]. Starting a word cancels every
//! timer left from the previous one.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, EngineConfig};
use crate::observer::RoundObserver;
use crate::progress::ProgressIntent;
use crate::rng::SimpleRng;
use crate::scheduler::{Scheduler, TimerQueue, TimerToken};
use crate::scoring::{calculate_xp, next_combo, INITIAL_COMBO};
use crate::snapshot::RoundSnapshot;
use crate::tiles::{Placement, TileRack};
use crate::types::{
    RoundOutcome, TileAction, Word, MISMATCH_RESET_DELAY_MS, ROUND_OVER_EMIT_DELAY_MS,
    WRONG_EMIT_DELAY_MS,
};

/// Where the current word is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "phase", content = "outcome", rename_all = "camelCase")]
pub enum RoundPhase {
    /// No word presented yet (or after restart).
    Idle,
    /// Word is falling and accepts input.
    Falling,
    /// Word hit the bottom; the outcome will be reported when its delay elapses.
    Resolving(RoundOutcome),
    /// Outcome reported; waiting for the next word.
    Resolved(RoundOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    Fall,
    EmitOutcome(RoundOutcome),
    MismatchReset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EngineTimer {
    kind: TimerKind,
    generation: u32,
}

/// A word that reached the bottom unsolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackedWord {
    pub word: Word,
    pub row: u8,
}

#[derive(Debug)]
pub struct GameEngine<O = Vec<crate::observer::RoundEvent>> {
    config: EngineConfig,
    observer: O,
    rng: SimpleRng,
    timers: TimerQueue<EngineTimer>,
    current: Option<Word>,
    rack: Option<TileRack>,
    falling_position: u8,
    stacked: Vec<StackedWord>,
    phase: RoundPhase,
    score: u32,
    combo: u32,
    /// Increments on every word start and restart; timers from older generations are dropped.
    generation: u32,
    fall_interval_ms: u32,
    fall_token: Option<TimerToken>,
    reset_token: Option<TimerToken>,
}

impl<O: RoundObserver> GameEngine<O> {
    pub fn new(config: EngineConfig, seed: u32, observer: O) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            observer,
            rng: SimpleRng::new(seed),
            timers: TimerQueue::new(),
            current: None,
            rack: None,
            falling_position: 0,
            stacked: Vec::new(),
            phase: RoundPhase::Idle,
            score: 0,
            combo: INITIAL_COMBO,
            generation: 0,
            fall_interval_ms: 0,
            fall_token: None,
            reset_token: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.phase == RoundPhase::Falling
    }

    pub fn is_round_over(&self) -> bool {
        matches!(
            self.phase,
            RoundPhase::Resolving(RoundOutcome::RoundOver)
                | RoundPhase::Resolved(RoundOutcome::RoundOver)
        )
    }

    /// Ready for [`GameEngine::start_word`].
    pub fn awaiting_word(&self) -> bool {
        matches!(
            self.phase,
            RoundPhase::Idle
                | RoundPhase::Resolved(RoundOutcome::Correct)
                | RoundPhase::Resolved(RoundOutcome::Wrong)
        )
    }

    pub fn current_word(&self) -> Option<&Word> {
        self.current.as_ref()
    }

    pub fn rack(&self) -> Option<&TileRack> {
        self.rack.as_ref()
    }

    pub fn answer_slots(&self) -> &[Option<char>] {
        self.rack.as_ref().map(TileRack::slots).unwrap_or(&[])
    }

    pub fn scrambled_tiles(&self) -> &[Option<char>] {
        self.rack.as_ref().map(TileRack::tiles).unwrap_or(&[])
    }

    pub fn falling_position(&self) -> u8 {
        self.falling_position
    }

    pub fn stacked_words(&self) -> &[StackedWord] {
        &self.stacked
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// Rows the current word can fall before it lands on the stack.
    pub fn max_position(&self) -> u8 {
        self.config
            .grid_height
            .saturating_sub(self.stacked.len().min(u8::MAX as usize) as u8)
    }

    /// Text shown on the falling word for the configured difficulty.
    pub fn prompt(&self) -> Option<&str> {
        self.current
            .as_ref()
            .map(|w| self.config.difficulty.prompt(w))
    }

    /// Present a new word. Returns false (and changes nothing) if the round is
    /// over or the word has no letters / too many letters.
    ///
    /// A WRONG still waiting on its emit delay is delivered immediately,
    /// before the new word starts.
    pub fn start_word(&mut self, word: &Word) -> bool {
        if self.is_round_over() {
            log::warn!("start_word({}) ignored: round is over", word.id);
            return false;
        }

        let max_position = self.max_position();
        if max_position == 0 {
            log::warn!("start_word({}) ignored: stack fills the grid", word.id);
            return false;
        }

        let answer = word.answer();
        let Some(rack) = TileRack::new(&answer, &mut self.rng) else {
            log::warn!(
                "start_word({}) ignored: unusable answer {:?}",
                word.id,
                word.english
            );
            return false;
        };

        // A landed word still owes its WRONG.
        if self.phase == RoundPhase::Resolving(RoundOutcome::Wrong) {
            self.emit(RoundOutcome::Wrong);
        }
        self.cancel_all_timers();
        self.generation = self.generation.wrapping_add(1);

        let fall_duration = rack.len() as u64 * self.config.time_per_letter_ms() as u64;
        self.fall_interval_ms = (fall_duration / max_position as u64)
            .min(u32::MAX as u64)
            .max(1) as u32;

        self.current = Some(word.clone());
        self.rack = Some(rack);
        self.falling_position = 0;
        self.phase = RoundPhase::Falling;
        self.fall_token = Some(self.timers.schedule_every(
            self.fall_interval_ms,
            EngineTimer {
                kind: TimerKind::Fall,
                generation: self.generation,
            },
        ));

        log::debug!(
            "word {} started: {} letters, {}ms per row, {} rows",
            word.id,
            answer.len(),
            self.fall_interval_ms,
            max_position
        );
        true
    }

    /// Move the falling word down one row. Returns false if no word is falling.
    pub fn tick(&mut self) -> bool {
        if self.phase != RoundPhase::Falling {
            return false;
        }

        self.falling_position = self.falling_position.saturating_add(1);
        if self.falling_position >= self.max_position() {
            self.land();
        }
        true
    }

    fn land(&mut self) {
        self.cancel_timers();

        let Some(word) = self.current.clone() else {
            return;
        };
        self.stacked.push(StackedWord {
            word,
            row: self.falling_position,
        });

        let (outcome, delay) = if self.stacked.len() >= self.config.max_wrong_words as usize {
            (RoundOutcome::RoundOver, ROUND_OVER_EMIT_DELAY_MS)
        } else {
            (RoundOutcome::Wrong, WRONG_EMIT_DELAY_MS)
        };

        log::debug!(
            "word landed at row {} ({} stacked), {} in {}ms",
            self.falling_position,
            self.stacked.len(),
            outcome.as_str(),
            delay
        );

        self.phase = RoundPhase::Resolving(outcome);
        self.timers.schedule_after(
            delay,
            EngineTimer {
                kind: TimerKind::EmitOutcome(outcome),
                generation: self.generation,
            },
        );
    }

    /// Move tile `tile_index` into the first empty answer slot.
    ///
    /// Stale or out-of-range indices are ignored.
    pub fn place_tile(&mut self, tile_index: usize) -> bool {
        if self.phase != RoundPhase::Falling || self.reset_token.is_some() {
            return false;
        }
        let Some(rack) = self.rack.as_mut() else {
            return false;
        };

        match rack.place(tile_index) {
            Placement::Ignored => false,
            Placement::Placed => true,
            Placement::Completed { matches: true } => {
                self.resolve_correct();
                true
            }
            Placement::Completed { matches: false } => {
                log::debug!("mismatch: {:?}, retrying", rack.attempt());
                self.reset_token = Some(self.timers.schedule_after(
                    MISMATCH_RESET_DELAY_MS,
                    EngineTimer {
                        kind: TimerKind::MismatchReset,
                        generation: self.generation,
                    },
                ));
                true
            }
        }
    }

    /// Send the letter in `slot_index` back to the first empty tile.
    pub fn recall_tile(&mut self, slot_index: usize) -> bool {
        if self.phase != RoundPhase::Falling || self.reset_token.is_some() {
            return false;
        }
        self.rack
            .as_mut()
            .map(|rack| rack.recall(slot_index))
            .unwrap_or(false)
    }

    /// Apply a keyboard-level action.
    pub fn apply_action(&mut self, action: TileAction) -> bool {
        match action {
            TileAction::Type(letter) => {
                match self.rack.as_ref().and_then(|r| r.find_tile(letter)) {
                    Some(idx) => self.place_tile(idx),
                    None => false,
                }
            }
            TileAction::Backspace => {
                match self.rack.as_ref().and_then(TileRack::last_filled_slot) {
                    Some(slot) => self.recall_tile(slot),
                    None => false,
                }
            }
            TileAction::Clear => {
                let mut any = false;
                while let Some(slot) = self.rack.as_ref().and_then(TileRack::last_filled_slot) {
                    if !self.recall_tile(slot) {
                        break;
                    }
                    any = true;
                }
                any
            }
        }
    }

    /// Advance the engine clock, firing every timer that comes due.
    ///
    /// Returns the number of timers handled.
    pub fn advance(&mut self, elapsed_ms: u32) -> usize {
        let until = self.timers.now_ms() + elapsed_ms as u64;
        let mut handled = 0;
        while let Some(fired) = self.timers.pop_due(until) {
            if fired.timer.generation != self.generation {
                continue;
            }
            handled += 1;
            match fired.timer.kind {
                TimerKind::Fall => {
                    self.tick();
                }
                TimerKind::EmitOutcome(outcome) => self.emit(outcome),
                TimerKind::MismatchReset => self.reset_mismatch(),
            }
        }
        self.timers.set_now(until);
        handled
    }

    /// Drop the stack, score and combo; cancel everything pending.
    pub fn restart(&mut self) {
        self.cancel_all_timers();
        self.generation = self.generation.wrapping_add(1);
        self.current = None;
        self.rack = None;
        self.falling_position = 0;
        self.stacked.clear();
        self.phase = RoundPhase::Idle;
        self.score = 0;
        self.combo = INITIAL_COMBO;
        self.fall_interval_ms = 0;
        log::debug!("round restarted");
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            prompt: self.prompt().map(str::to_string),
            word_id: self.current.as_ref().map(|w| w.id.clone()),
            answer_slots: self.answer_slots().to_vec(),
            scrambled_tiles: self.scrambled_tiles().to_vec(),
            falling_position: self.falling_position,
            max_position: self.max_position(),
            grid_height: self.config.grid_height,
            max_wrong_words: self.config.max_wrong_words,
            stacked_words: self
                .stacked
                .iter()
                .map(|s| self.config.difficulty.prompt(&s.word).to_string())
                .collect(),
            phase: self.phase,
            is_animating: self.is_animating(),
            retry_pending: self.reset_token.is_some(),
            score: self.score,
            combo: self.combo,
            difficulty: self.config.difficulty,
            fall_interval_ms: self.fall_interval_ms,
        }
    }

    /// Cancel the fall and retry timers of the current word.
    fn cancel_timers(&mut self) {
        if let Some(token) = self.fall_token.take() {
            self.timers.cancel(token);
        }
        if let Some(token) = self.reset_token.take() {
            self.timers.cancel(token);
        }
    }

    /// Cancel everything, including delayed outcome emits.
    fn cancel_all_timers(&mut self) {
        self.timers.cancel_all();
        self.fall_token = None;
        self.reset_token = None;
    }

    fn resolve_correct(&mut self) {
        self.cancel_timers();
        let Some(word) = self.current.clone() else {
            return;
        };

        let xp = calculate_xp(self.combo, self.config.difficulty);
        let new_combo = next_combo(self.combo, RoundOutcome::Correct);
        self.score = self.score.saturating_add(xp);
        self.combo = new_combo;
        self.phase = RoundPhase::Resolved(RoundOutcome::Correct);

        log::info!("word {} correct: +{} xp, combo {}", word.id, xp, new_combo);
        self.observer
            .on_progress(ProgressIntent::Increment(word.id.clone()));
        self.observer.on_correct(&word, xp, new_combo);
    }

    fn emit(&mut self, outcome: RoundOutcome) {
        if self.phase != RoundPhase::Resolving(outcome) {
            return;
        }
        let Some(word) = self.current.clone() else {
            return;
        };

        self.combo = next_combo(self.combo, outcome);
        self.phase = RoundPhase::Resolved(outcome);

        log::info!("word {} {}", word.id, outcome.as_str());
        self.observer
            .on_progress(ProgressIntent::Reset(word.id.clone()));
        match outcome {
            RoundOutcome::Wrong => self.observer.on_wrong(&word),
            RoundOutcome::RoundOver => self.observer.on_round_over(&word),
            RoundOutcome::Correct => {}
        }
    }

    fn reset_mismatch(&mut self) {
        self.reset_token = None;
        if self.phase != RoundPhase::Falling {
            return;
        }
        if let Some(rack) = self.rack.as_mut() {
            rack.reshuffle(&mut self.rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::RoundEvent;
    use crate::types::Difficulty;

    fn engine() -> GameEngine {
        GameEngine::new(EngineConfig::default(), 12345, Vec::new()).unwrap()
    }

    fn hard_engine() -> GameEngine {
        let config = EngineConfig::default().with_difficulty(Difficulty::Hard);
        GameEngine::new(config, 12345, Vec::new()).unwrap()
    }

    fn word(english: &str) -> Word {
        Word::new(format!("id-{english}"), english, "ceviri", 1)
    }

    fn type_answer(engine: &mut GameEngine, answer: &str) {
        for c in answer.chars() {
            assert!(engine.apply_action(TileAction::Type(c)), "could not type {c}");
        }
    }

    fn outcomes(engine: &GameEngine) -> Vec<RoundOutcome> {
        engine
            .observer()
            .iter()
            .filter_map(RoundEvent::outcome)
            .collect()
    }

    /// Let the word fall to the bottom and past the emit delay.
    fn fail_word(engine: &mut GameEngine, w: &Word) {
        assert!(engine.start_word(w));
        let rows = engine.max_position() as u32;
        engine.advance(engine.fall_interval_ms() * rows);
        engine.advance(ROUND_OVER_EMIT_DELAY_MS);
    }

    #[test]
    fn test_new_engine_is_idle() {
        let e = engine();
        assert_eq!(e.phase(), RoundPhase::Idle);
        assert_eq!(e.combo(), 1);
        assert_eq!(e.score(), 0);
        assert!(e.awaiting_word());
        assert!(e.answer_slots().is_empty());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = EngineConfig {
            max_wrong_words: 20,
            ..EngineConfig::default()
        };
        assert!(GameEngine::new(config, 1, ()).is_err());
    }

    #[test]
    fn test_start_word_sets_up_round() {
        let mut e = engine();
        assert!(e.start_word(&word("cat")));

        assert_eq!(e.phase(), RoundPhase::Falling);
        assert!(e.is_animating());
        assert_eq!(e.falling_position(), 0);
        assert_eq!(e.answer_slots().len(), 3);
        assert!(e.answer_slots().iter().all(Option::is_none));
        assert_eq!(e.scrambled_tiles().len(), 3);
        assert!(e.rack().unwrap().conserves_letters());
        // 3 letters * 2000ms over 10 rows
        assert_eq!(e.fall_interval_ms(), 600);
    }

    #[test]
    fn test_start_word_rejects_empty() {
        let mut e = engine();
        assert!(!e.start_word(&word("")));
        assert!(!e.start_word(&word("123")));
        assert_eq!(e.phase(), RoundPhase::Idle);
    }

    #[test]
    fn test_hard_mode_interval_for_elephant() {
        let mut e = hard_engine();
        assert!(e.start_word(&word("elephant")));
        assert_eq!(e.max_position(), 10);
        assert_eq!(e.fall_interval_ms(), 3200);
        assert_eq!(e.prompt(), Some("ceviri"));
    }

    #[test]
    fn test_tick_advances_one_row() {
        let mut e = engine();
        e.start_word(&word("cat"));
        assert!(e.tick());
        assert_eq!(e.falling_position(), 1);

        e.advance(600);
        assert_eq!(e.falling_position(), 2);
        e.advance(599);
        assert_eq!(e.falling_position(), 2);
        e.advance(1);
        assert_eq!(e.falling_position(), 3);
    }

    #[test]
    fn test_tick_without_word_is_noop() {
        let mut e = engine();
        assert!(!e.tick());
        assert_eq!(e.falling_position(), 0);
    }

    #[test]
    fn test_correct_answer_emits_xp() {
        let mut e = engine();
        e.start_word(&word("cat"));
        type_answer(&mut e, "cat");

        assert_eq!(e.phase(), RoundPhase::Resolved(RoundOutcome::Correct));
        assert!(!e.is_animating());
        assert_eq!(e.combo(), 2);
        assert_eq!(e.score(), 100);
        assert_eq!(
            e.observer().as_slice(),
            &[
                RoundEvent::Progress {
                    intent: ProgressIntent::Increment("id-cat".into())
                },
                RoundEvent::Correct {
                    word: word("cat"),
                    xp: 100,
                    new_combo: 2
                },
            ]
        );

        // No fall timer left behind.
        e.advance(60_000);
        assert_eq!(e.observer().len(), 2);
    }

    #[test]
    fn test_combo_three_scores_110() {
        let mut e = engine();
        for w in ["dog", "sun"] {
            e.start_word(&word(w));
            type_answer(&mut e, w);
        }
        assert_eq!(e.combo(), 3);

        e.start_word(&word("cat"));
        type_answer(&mut e, "cat");
        match e.observer().last() {
            Some(RoundEvent::Correct { xp, new_combo, .. }) => {
                assert_eq!(*xp, 110);
                assert_eq!(*new_combo, 4);
            }
            other => panic!("expected correct, got {other:?}"),
        }
    }

    #[test]
    fn test_word_reaching_bottom_is_wrong() {
        let mut e = engine();
        e.start_word(&word("sun"));

        e.advance(600 * 10);
        assert_eq!(e.phase(), RoundPhase::Resolving(RoundOutcome::Wrong));
        assert_eq!(e.stacked_words().len(), 1);
        assert_eq!(e.stacked_words()[0].row, 10);
        assert!(outcomes(&e).is_empty());

        e.advance(WRONG_EMIT_DELAY_MS - 1);
        assert!(outcomes(&e).is_empty());
        e.advance(1);
        assert_eq!(outcomes(&e), vec![RoundOutcome::Wrong]);
        assert_eq!(e.combo(), 1);
        assert!(e.awaiting_word());
    }

    #[test]
    fn test_wrong_resets_combo() {
        let mut e = engine();
        e.start_word(&word("dog"));
        type_answer(&mut e, "dog");
        assert_eq!(e.combo(), 2);

        fail_word(&mut e, &word("sun"));
        assert_eq!(e.combo(), 1);
    }

    #[test]
    fn test_stack_shrinks_fall_distance() {
        let mut e = engine();
        fail_word(&mut e, &word("sun"));
        assert_eq!(e.max_position(), 9);

        e.start_word(&word("cat"));
        // 6000ms over 9 rows
        assert_eq!(e.fall_interval_ms(), 666);
    }

    #[test]
    fn test_ninth_stacked_word_ends_round() {
        let mut e = engine();
        for i in 0..8 {
            fail_word(&mut e, &word("sun"));
            assert_eq!(e.stacked_words().len(), i + 1);
        }
        assert_eq!(outcomes(&e), vec![RoundOutcome::Wrong; 8]);

        fail_word(&mut e, &word("sun"));
        assert_eq!(e.stacked_words().len(), 9);
        assert!(e.is_round_over());
        assert_eq!(outcomes(&e).last(), Some(&RoundOutcome::RoundOver));
        assert_eq!(
            outcomes(&e)
                .iter()
                .filter(|o| **o == RoundOutcome::RoundOver)
                .count(),
            1
        );

        // Nothing more starts until restart.
        assert!(!e.start_word(&word("cat")));
        assert_eq!(e.stacked_words().len(), 9);
    }

    #[test]
    fn test_round_over_waits_full_delay() {
        let config = EngineConfig {
            max_wrong_words: 1,
            ..EngineConfig::default()
        };
        let mut e = GameEngine::new(config, 1, Vec::new()).unwrap();
        e.start_word(&word("sun"));
        e.advance(e.fall_interval_ms() * 10);
        assert_eq!(e.phase(), RoundPhase::Resolving(RoundOutcome::RoundOver));

        e.advance(WRONG_EMIT_DELAY_MS);
        assert!(outcomes(&e).is_empty());
        e.advance(ROUND_OVER_EMIT_DELAY_MS - WRONG_EMIT_DELAY_MS);
        assert_eq!(outcomes(&e), vec![RoundOutcome::RoundOver]);
    }

    #[test]
    fn test_mismatch_reshuffles_after_delay() {
        let mut e = engine();
        e.start_word(&word("cat"));
        type_answer(&mut e, "act");

        assert_eq!(e.phase(), RoundPhase::Falling);
        assert_eq!(e.rack().unwrap().filled_slots(), 3);
        // Input is frozen until the reset.
        assert!(!e.recall_tile(0));

        e.advance(MISMATCH_RESET_DELAY_MS);
        assert_eq!(e.rack().unwrap().filled_slots(), 0);
        assert_eq!(e.rack().unwrap().remaining_tiles(), 3);
        assert!(outcomes(&e).is_empty());

        type_answer(&mut e, "cat");
        assert_eq!(outcomes(&e), vec![RoundOutcome::Correct]);
    }

    #[test]
    fn test_mismatch_keeps_combo() {
        let mut e = engine();
        e.start_word(&word("dog"));
        type_answer(&mut e, "dog");

        e.start_word(&word("cat"));
        type_answer(&mut e, "tac");
        e.advance(MISMATCH_RESET_DELAY_MS);
        assert_eq!(e.combo(), 2);
    }

    #[test]
    fn test_landing_cancels_pending_mismatch_reset() {
        let mut e = engine();
        e.start_word(&word("cat"));
        e.advance(600 * 9 + 300);
        type_answer(&mut e, "tac");

        // Lands at 6000ms, before the retry at 6200ms.
        e.advance(300);
        assert_eq!(e.phase(), RoundPhase::Resolving(RoundOutcome::Wrong));
        e.advance(MISMATCH_RESET_DELAY_MS);
        // Slots stay as they were when the word landed.
        assert_eq!(e.rack().unwrap().filled_slots(), 3);
        assert_eq!(outcomes(&e), vec![RoundOutcome::Wrong]);
    }

    #[test]
    fn test_new_word_flushes_pending_wrong() {
        let mut e = engine();
        e.start_word(&word("sun"));
        e.advance(600 * 10);
        assert_eq!(e.phase(), RoundPhase::Resolving(RoundOutcome::Wrong));

        e.advance(100);
        e.start_word(&word("dog"));
        type_answer(&mut e, "dog");
        assert_eq!(e.combo(), 2);

        // Host moves on before the delayed emit.
        e.start_word(&word("sun"));
        e.advance(600 * 10);
        e.start_word(&word("cat"));
        assert_eq!(
            outcomes(&e),
            vec![RoundOutcome::Wrong, RoundOutcome::Correct, RoundOutcome::Wrong]
        );
        assert_eq!(e.combo(), 1);
        assert_eq!(
            e.observer()[e.observer().len() - 2],
            RoundEvent::Progress {
                intent: ProgressIntent::Reset("id-sun".into())
            }
        );

        // The old emit timer must not fire into the new word.
        e.advance(1000);
        assert_eq!(outcomes(&e).len(), 3);
        assert_eq!(e.phase(), RoundPhase::Falling);
        assert_eq!(e.stacked_words().len(), 2);
    }

    #[test]
    fn test_huge_time_per_letter_does_not_overflow() {
        let config = EngineConfig {
            time_per_letter_normal_ms: 200_000_000,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_ok());
        let mut e = GameEngine::new(config, 1, Vec::new()).unwrap();

        let long = "abcdefghijklmnopqrstuvwxyzabcd";
        assert!(e.start_word(&word(long)));
        // 30 * 200_000_000 / 10 rows
        assert_eq!(e.fall_interval_ms(), 600_000_000);

        let config = EngineConfig {
            grid_height: 1,
            max_wrong_words: 1,
            time_per_letter_normal_ms: u32::MAX,
            ..EngineConfig::default()
        };
        let mut e = GameEngine::new(config, 1, Vec::new()).unwrap();
        assert!(e.start_word(&word(long)));
        assert_eq!(e.fall_interval_ms(), u32::MAX);
    }

    #[test]
    fn test_input_ignored_when_not_falling() {
        let mut e = engine();
        assert!(!e.place_tile(0));
        assert!(!e.recall_tile(0));

        e.start_word(&word("cat"));
        type_answer(&mut e, "cat");
        assert!(!e.place_tile(0));
        assert!(!e.apply_action(TileAction::Backspace));
    }

    #[test]
    fn test_out_of_range_indices_ignored() {
        let mut e = engine();
        e.start_word(&word("cat"));
        assert!(!e.place_tile(3));
        assert!(!e.place_tile(usize::MAX));
        assert!(!e.recall_tile(0));
        assert!(!e.recall_tile(7));
        assert!(e.rack().unwrap().conserves_letters());
    }

    #[test]
    fn test_backspace_and_clear() {
        let mut e = engine();
        e.start_word(&word("house"));
        type_answer(&mut e, "hou");

        assert!(e.apply_action(TileAction::Backspace));
        assert_eq!(e.rack().unwrap().attempt(), "ho");

        assert!(e.apply_action(TileAction::Clear));
        assert_eq!(e.rack().unwrap().filled_slots(), 0);
        assert!(!e.apply_action(TileAction::Clear));
        assert!(!e.apply_action(TileAction::Type('z')));
    }

    #[test]
    fn test_restart_clears_round() {
        let mut e = engine();
        e.start_word(&word("dog"));
        type_answer(&mut e, "dog");
        fail_word(&mut e, &word("sun"));

        e.restart();
        assert_eq!(e.phase(), RoundPhase::Idle);
        assert_eq!(e.score(), 0);
        assert_eq!(e.combo(), 1);
        assert!(e.stacked_words().is_empty());
        assert_eq!(e.max_position(), 10);
    }

    #[test]
    fn test_restart_after_round_over_allows_play() {
        let config = EngineConfig {
            max_wrong_words: 1,
            ..EngineConfig::default()
        };
        let mut e = GameEngine::new(config, 1, Vec::new()).unwrap();
        fail_word(&mut e, &word("sun"));
        assert!(e.is_round_over());

        e.restart();
        assert!(e.start_word(&word("cat")));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut e = hard_engine();
        e.start_word(&word("cat"));
        e.apply_action(TileAction::Type('c'));
        let snap = e.snapshot();

        assert_eq!(snap.prompt.as_deref(), Some("ceviri"));
        assert_eq!(snap.answer_slots, vec![Some('c'), None, None]);
        assert_eq!(snap.scrambled_tiles.iter().flatten().count(), 2);
        assert!(snap.is_animating);
        assert_eq!(snap.grid_height, 10);
        assert_eq!(snap.difficulty, Difficulty::Hard);
    }
}
