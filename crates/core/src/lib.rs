//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the falling-word rules, the timers that drive them,
//! and the package progression logic. It has **zero dependencies** on UI,
//! files, or networking, making it:
//!
//! - **Deterministic**: Same seed and same input produce identical rounds
//! - **Testable**: Time only moves when the host calls [`GameEngine::advance`]
//! - **Portable**: Runs headless, in the terminal, or behind any other host
//!
//! # Module Structure
//!
//! - [`engine`]: One falling word at a time, with tile input and outcomes
//! - [`scheduler`]: Manual-clock timer queue with cancellable tokens
//! - [`tiles`]: Answer slots and scrambled tiles for one word
//! - [`rng`]: Seeded Fisher-Yates shuffling
//! - [`scoring`]: XP awards and the combo chain
//! - [`observer`]: Outcome callbacks (collecting, channel, or custom)
//! - [`progress`]: Per-word star ratings and progress intents
//! - [`unlock`]: Sequential package unlocking
//! - [`config`]: Engine configuration and validation
//! - [`snapshot`]: Read-only round state for renderers
//!
//! # Game Rules
//!
//! - **Fall time**: `letters × 2000ms` (normal) or `letters × 4000ms` (hard)
//! - **Stack**: Words that reach the bottom stay there and shorten the fall
//! - **Round over**: The 9th stacked word ends the round
//! - **XP**: `100 + min((combo-1)*5, 50)` normal, `200 + min((combo-1)*10, 100)` hard
//! - **Stars**: +1 per correct answer (max 5), back to 1 on failure; 3+ is mastered
//! - **Unlocking**: A package opens once every earlier package is fully mastered
//!
//! # Example
//!
//! ```
//! use wordfall_core::{EngineConfig, GameEngine, RoundEvent};
//! use wordfall_core::types::{TileAction, Word};
//!
//! let mut engine = GameEngine::new(EngineConfig::default(), 12345, Vec::<RoundEvent>::new()).unwrap();
//! engine.start_word(&Word::new("w1", "cat", "kedi", 1));
//!
//! for c in "cat".chars() {
//!     engine.apply_action(TileAction::Type(c));
//! }
//!
//! assert_eq!(engine.score(), 100);
//! assert!(matches!(
//!     engine.observer().last(),
//!     Some(RoundEvent::Correct { xp: 100, new_combo: 2, .. })
//! ));
//! ```

pub mod config;
pub mod engine;
pub mod observer;
pub mod progress;
pub mod rng;
pub mod scheduler;
pub mod scoring;
pub mod snapshot;
pub mod tiles;
pub mod unlock;

pub use wordfall_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, EngineConfig};
pub use engine::{GameEngine, RoundPhase, StackedWord};
pub use observer::{RoundEvent, RoundObserver};
pub use progress::{ProgressBook, ProgressIntent};
pub use rng::SimpleRng;
pub use scheduler::{Scheduler, TimerQueue, TimerToken};
pub use scoring::calculate_xp;
pub use snapshot::RoundSnapshot;
pub use tiles::{Placement, TileRack};
pub use unlock::{package_progress, resolve_unlocked, unlocked_packages, PackageProgress};
