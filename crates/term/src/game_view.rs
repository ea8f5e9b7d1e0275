//! GameView: maps a `RoundSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, top to bottom: the falling grid (one word per row, stack at the
//! bottom), the answer slots, then the scrambled tiles. Score and combo sit in
//! a side panel when the terminal is wide enough.

use crate::core::{RoundPhase, RoundSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::RoundOutcome;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Host-level progress shown next to the round.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionStatus {
    pub package_name: String,
    pub words_left: u32,
    pub correct: u32,
    pub wrong: u32,
}

const BG: Rgb = Rgb::new(0, 0, 0);
const GRID_BG: Rgb = Rgb::new(25, 28, 40);

const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), BG);
const GRID: CellStyle = CellStyle::new(Rgb::new(70, 75, 90), GRID_BG).dim();
const FALLING: CellStyle = CellStyle::new(Rgb::new(250, 220, 90), GRID_BG).bold();
const STACKED: CellStyle = CellStyle::new(Rgb::new(220, 90, 90), GRID_BG);
const SLOT: CellStyle = CellStyle::new(Rgb::new(120, 220, 140), BG).bold();
const SLOT_WRONG: CellStyle = CellStyle::new(Rgb::new(230, 80, 80), BG).bold();
const TILE: CellStyle = CellStyle::new(Rgb::new(230, 230, 230), Rgb::new(50, 55, 75)).bold();
const EMPTY: CellStyle = CellStyle::new(Rgb::new(90, 90, 100), BG).dim();
const LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), BG).bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), BG);
const BANNER: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), BG).bold();

/// Lightweight terminal renderer for a falling-word round.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Inner width of the grid in columns.
    grid_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self { grid_w: 24 }
    }
}

impl GameView {
    pub fn new(grid_w: u16) -> Self {
        Self {
            grid_w: grid_w.max(8),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &RoundSnapshot,
        status: Option<&SessionStatus>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default());

        let frame_w = self.grid_w + 2;
        let rows = snap.grid_height as u16;
        // grid + border + gap + slots + gap + tiles
        let frame_h = rows + 2;
        let total_h = frame_h + 4;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(total_h) / 2;

        self.draw_border(fb, start_x, start_y, frame_w, frame_h);
        fb.fill_rect(start_x + 1, start_y + 1, self.grid_w, rows, '·', GRID);

        // Stack grows up from the bottom row.
        for (i, prompt) in snap.stacked_words.iter().enumerate() {
            if let Some(row) = snap.stacked_row(i) {
                self.draw_grid_text(fb, start_x, start_y, row as u16, prompt, STACKED);
            }
        }

        if snap.is_animating && snap.falling_position < snap.max_position {
            if let Some(prompt) = snap.prompt.as_deref() {
                let row = snap.falling_position as u16;
                self.draw_grid_text(fb, start_x, start_y, row, prompt, FALLING);
            }
        }

        let slots_y = start_y + frame_h + 1;
        let slot_style = if snap.retry_pending { SLOT_WRONG } else { SLOT };
        self.draw_letters(fb, start_x, frame_w, slots_y, &snap.answer_slots, slot_style, '_');
        self.draw_letters(fb, start_x, frame_w, slots_y + 2, &snap.scrambled_tiles, TILE, ' ');

        self.draw_side_panel(fb, snap, status, viewport, start_x + frame_w + 2, start_y);

        if let Some(text) = banner(snap) {
            fb.put_str_centered(start_x, frame_w, start_y + frame_h / 2, text, BANNER);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &RoundSnapshot,
        status: Option<&SessionStatus>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, status, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        if w < 2 || h < 2 {
            return;
        }
        fb.put_char(x, y, '┌', BORDER);
        fb.put_char(x + w - 1, y, '┐', BORDER);
        fb.put_char(x, y + h - 1, '└', BORDER);
        fb.put_char(x + w - 1, y + h - 1, '┘', BORDER);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', BORDER);
            fb.put_char(x + dx, y + h - 1, '─', BORDER);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', BORDER);
            fb.put_char(x + w - 1, y + dy, '│', BORDER);
        }
    }

    fn draw_grid_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        row: u16,
        text: &str,
        style: CellStyle,
    ) {
        let clipped: String = text.chars().take(self.grid_w as usize).collect();
        let y = start_y + 1 + row;
        fb.fill_rect(start_x + 1, y, self.grid_w, 1, ' ', CellStyle { dim: false, ..GRID });
        fb.put_str_centered(start_x + 1, self.grid_w, y, &clipped, style);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_letters(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        w: u16,
        y: u16,
        letters: &[Option<char>],
        style: CellStyle,
        empty: char,
    ) {
        // Two columns per letter.
        let text: String = letters
            .iter()
            .map(|l| l.unwrap_or(empty))
            .flat_map(|c| [c, ' '])
            .collect();
        let text = text.trim_end();
        let len = text.chars().count() as u16;
        let mut cx = x.saturating_add(w.saturating_sub(len) / 2);
        for (ch, letter) in text.chars().zip(letters.iter().flat_map(|l| [Some(*l), None])) {
            let cell_style = match letter {
                Some(Some(_)) => style,
                Some(None) => EMPTY,
                None => CellStyle::default(),
            };
            fb.put_char(cx, y, ch, cell_style);
            cx += 1;
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &RoundSnapshot,
        status: Option<&SessionStatus>,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let mut y = start_y;
        let mut field = |fb: &mut FrameBuffer, label: &str, value: &str| {
            fb.put_str(panel_x, y, label, LABEL);
            fb.put_str(panel_x, y + 1, value, VALUE);
            y += 3;
        };

        field(fb, "XP", &snap.score.to_string());
        field(fb, "COMBO", &format!("x{}", snap.combo));
        field(
            fb,
            "STACK",
            &format!("{}/{}", snap.stacked_words.len(), snap.max_wrong_words),
        );
        field(fb, "MODE", snap.difficulty.as_str());

        if let Some(st) = status {
            field(fb, "PACKAGE", &st.package_name);
            field(fb, "LEFT", &st.words_left.to_string());
            field(fb, "RIGHT/WRONG", &format!("{}/{}", st.correct, st.wrong));
        }
    }
}

fn banner(snap: &RoundSnapshot) -> Option<&'static str> {
    match snap.phase {
        RoundPhase::Idle => Some("READY"),
        RoundPhase::Falling if snap.retry_pending => Some("TRY AGAIN"),
        RoundPhase::Falling => None,
        RoundPhase::Resolving(RoundOutcome::RoundOver)
        | RoundPhase::Resolved(RoundOutcome::RoundOver) => Some("ROUND OVER"),
        RoundPhase::Resolving(_) | RoundPhase::Resolved(RoundOutcome::Wrong) => Some("TOO SLOW"),
        RoundPhase::Resolved(RoundOutcome::Correct) => Some("CORRECT!"),
    }
}
