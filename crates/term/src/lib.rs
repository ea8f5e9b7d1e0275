//! Terminal "game renderer" module.
//!
//! A small rendering layer for playing rounds in a terminal. The view is pure:
//! it draws a [`crate::core::RoundSnapshot`] into a framebuffer of styled
//! cells. Only [`TerminalRenderer`] touches the terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use wordfall_core as core;
pub use wordfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, SessionStatus, Viewport};
pub use renderer::{encode_frame_into, TerminalRenderer};
