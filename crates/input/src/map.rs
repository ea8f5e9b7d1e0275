//! Key mapping from terminal events to tile actions.

use crate::types::TileAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to tile actions.
pub fn handle_key_event(key: KeyEvent) -> Option<TileAction> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }

    match key.code {
        KeyCode::Char(c) => TileAction::from_char(c),
        KeyCode::Backspace | KeyCode::Left => Some(TileAction::Backspace),
        KeyCode::Delete => Some(TileAction::Clear),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Check if key should restart the round.
pub fn is_restart(key: KeyEvent) -> bool {
    key.code == KeyCode::F(5)
        || (key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::CONTROL))
}
