//! Host-facing outcome notifications.

use std::sync::mpsc;

use serde::{Deserialize, Serialize};

use crate::progress::ProgressIntent;
use crate::types::{RoundOutcome, Word};

/// Receives terminal outcomes and progress intents from the engine.
///
/// Each outcome method runs exactly once per word. The progress intent for a
/// word is delivered just before its outcome.
pub trait RoundObserver {
    fn on_correct(&mut self, word: &Word, xp: u32, new_combo: u32);
    fn on_wrong(&mut self, word: &Word);
    fn on_round_over(&mut self, word: &Word);
    fn on_progress(&mut self, _intent: ProgressIntent) {}
}

/// Owned record of one notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RoundEvent {
    Correct { word: Word, xp: u32, new_combo: u32 },
    Wrong { word: Word },
    RoundOver { word: Word },
    Progress { intent: ProgressIntent },
}

impl RoundEvent {
    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self {
            RoundEvent::Correct { .. } => Some(RoundOutcome::Correct),
            RoundEvent::Wrong { .. } => Some(RoundOutcome::Wrong),
            RoundEvent::RoundOver { .. } => Some(RoundOutcome::RoundOver),
            RoundEvent::Progress { .. } => None,
        }
    }
}

impl RoundObserver for () {
    fn on_correct(&mut self, _word: &Word, _xp: u32, _new_combo: u32) {}
    fn on_wrong(&mut self, _word: &Word) {}
    fn on_round_over(&mut self, _word: &Word) {}
}

impl RoundObserver for Vec<RoundEvent> {
    fn on_correct(&mut self, word: &Word, xp: u32, new_combo: u32) {
        self.push(RoundEvent::Correct {
            word: word.clone(),
            xp,
            new_combo,
        });
    }

    fn on_wrong(&mut self, word: &Word) {
        self.push(RoundEvent::Wrong { word: word.clone() });
    }

    fn on_round_over(&mut self, word: &Word) {
        self.push(RoundEvent::RoundOver { word: word.clone() });
    }

    fn on_progress(&mut self, intent: ProgressIntent) {
        self.push(RoundEvent::Progress { intent });
    }
}

// A dropped receiver just means nobody is listening anymore.
impl RoundObserver for mpsc::Sender<RoundEvent> {
    fn on_correct(&mut self, word: &Word, xp: u32, new_combo: u32) {
        let _ = self.send(RoundEvent::Correct {
            word: word.clone(),
            xp,
            new_combo,
        });
    }

    fn on_wrong(&mut self, word: &Word) {
        let _ = self.send(RoundEvent::Wrong { word: word.clone() });
    }

    fn on_round_over(&mut self, word: &Word) {
        let _ = self.send(RoundEvent::RoundOver { word: word.clone() });
    }

    fn on_progress(&mut self, intent: ProgressIntent) {
        let _ = self.send(RoundEvent::Progress { intent });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_observer_records_in_order() {
        let word = Word::new("1", "cat", "kedi", 1);
        let mut events: Vec<RoundEvent> = Vec::new();
        events.on_progress(ProgressIntent::Increment("1".into()));
        events.on_correct(&word, 110, 4);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].outcome(), None);
        assert_eq!(events[1].outcome(), Some(RoundOutcome::Correct));
    }

    #[test]
    fn channel_observer_sends() {
        let word = Word::new("1", "cat", "kedi", 1);
        let (mut tx, rx) = mpsc::channel();
        tx.on_wrong(&word);
        assert_eq!(rx.try_recv().unwrap(), RoundEvent::Wrong { word });
    }

    #[test]
    fn channel_observer_survives_dropped_receiver() {
        let word = Word::new("1", "cat", "kedi", 1);
        let (mut tx, rx) = mpsc::channel::<RoundEvent>();
        drop(rx);
        tx.on_round_over(&word);
    }
}
