//! Wordfall (workspace facade crate).
//!
//! Re-exports the game crates under `crates/` and adds the host side: deck
//! and progress files, the play session, and argument parsing for the
//! `wordfall` binary.

pub use wordfall_core as core;
pub use wordfall_input as input;
pub use wordfall_term as term;
pub use wordfall_types as types;

pub mod cli;
pub mod deck;
pub mod progress_file;
pub mod session;

pub use deck::{Deck, DeckError};
pub use progress_file::ProgressFileError;
pub use session::{RoundSession, SessionEnd, SessionSummary};
