//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::TileAction`]s. Letters
//! place tiles, so host commands (quit, restart) live on keys that can never
//! be part of an answer.

pub mod map;

pub use wordfall_types as types;

pub use map::{handle_key_event, is_restart, should_quit};
