//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so every frame can be checked in unit tests.

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::GRID_SIZE;

const N: u16 = GRID_SIZE as u16;
/// Terminal columns per board cell; compensates for tall glyphs.
const CELL_W: u16 = 2;
const FRAME_W: u16 = N * CELL_W + 2;
const FRAME_H: u16 = N + 2;
const PANEL_GAP: u16 = 2;
const PANEL_W: u16 = 16;

const BLACK: Rgb = Rgb::new(0, 0, 0);
const FIELD_BG: Rgb = Rgb::new(24, 24, 32);
const GRID_DOT: Rgb = Rgb::new(70, 70, 82);
const BORDER: Rgb = Rgb::new(200, 200, 200);
const LABEL: Rgb = Rgb::new(150, 150, 160);
const VALUE: Rgb = Rgb::new(240, 240, 240);
const OVERLAY_BG: Rgb = Rgb::new(60, 20, 20);

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

    /// Smallest viewport the full layout fits in
    pub const fn minimum() -> Self {
        Self {
            width: FRAME_W + PANEL_GAP + PANEL_W,
            height: FRAME_H,
        }
    }

    fn fits(&self) -> bool {
        let min = Self::minimum();
        self.width >= min.width && self.height >= min.height
    }
}

/// Screen position of the board frame's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardOrigin {
    pub x: u16,
    pub y: u16,
}

impl BoardOrigin {
    /// Terminal column and row of board cell (x, y)
    pub fn cell(&self, x: u16, y: u16) -> (u16, u16) {
        (self.x + 1 + x * CELL_W, self.y + 1 + y)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Where the board lands in `viewport` (centered with the side panel).
    pub fn board_origin(&self, viewport: Viewport) -> BoardOrigin {
        let min = Viewport::minimum();
        BoardOrigin {
            x: viewport.width.saturating_sub(min.width) / 2,
            y: viewport.height.saturating_sub(min.height) / 2,
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::new(' ', Style::new(VALUE, BLACK)));

        if !viewport.fits() {
            let msg = "enlarge terminal";
            let x = viewport.width.saturating_sub(msg.len() as u16) / 2;
            fb.put_str(x, viewport.height / 2, msg, Style::new(LABEL, BLACK));
            return;
        }

        let origin = self.board_origin(viewport);
        fb.draw_box(origin.x, origin.y, FRAME_W, FRAME_H, Style::new(BORDER, BLACK));
        self.draw_field(fb, origin, snap);
        self.draw_panel(fb, origin, snap);

        if snap.game_over {
            self.draw_overlay(fb, origin, "GAME OVER", Some(snap.score));
        } else if snap.paused {
            self.draw_overlay(fb, origin, "PAUSED", None);
        }
    }

    /// Render into a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_field(&self, fb: &mut FrameBuffer, origin: BoardOrigin, snap: &GameSnapshot) {
        let settled = snap.grid;
        let composite = snap.composite();

        for y in 0..N {
            for x in 0..N {
                let (cx, cy) = origin.cell(x, y);
                let (ux, uy) = (x as usize, y as usize);
                let glyph = match composite[uy][ux] {
                    // Settled cells a shade darker than the falling piece.
                    Some(color) if settled[uy][ux].is_some() => {
                        Glyph::new('█', Style::new(Rgb::from(color).shade(200), FIELD_BG))
                    }
                    Some(color) => Glyph::new('█', Style::new(color.into(), FIELD_BG).bold()),
                    None => Glyph::new(' ', Style::new(GRID_DOT, FIELD_BG)),
                };
                fb.set(cx, cy, glyph);
                let right = if glyph.ch == ' ' {
                    Glyph::new('·', glyph.style)
                } else {
                    glyph
                };
                fb.set(cx + 1, cy, right);
            }
        }
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, origin: BoardOrigin, snap: &GameSnapshot) {
        let x = origin.x + FRAME_W + PANEL_GAP;
        let label = Style::new(LABEL, BLACK);
        let value = Style::new(VALUE, BLACK).bold();
        let mut y = origin.y;

        for (name, number) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level as u64),
            ("TURNS", snap.grid_rotations as u64),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_u64(x, y + 1, number, value);
            y += 2;
        }

        fb.put_str(x, y, "SPIN", label);
        match snap.active {
            Some(active) => {
                let end = fb.put_u64(x, y + 1, active.rotation.degrees() as u64, value);
                fb.put_str(end, y + 1, "°", value);
            }
            None => {
                fb.put_str(x, y + 1, "-", value);
            }
        }
        y += 3;

        let hint = Style::new(GRID_DOT, BLACK);
        for line in ["←→↓ move  ↑ spin", "spc pause  r new", "q quit"] {
            fb.put_str(x, y, line, hint);
            y += 1;
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        origin: BoardOrigin,
        title: &str,
        final_score: Option<u64>,
    ) {
        let style = Style::new(VALUE, OVERLAY_BG).bold();
        let (x, width) = (origin.x + 1, FRAME_W - 2);
        let top = origin.y + FRAME_H / 2 - 1;
        let rows = if final_score.is_some() { 4 } else { 1 };
        fb.fill_rect(x, top, width, rows, Glyph::new(' ', style));

        put_centered(fb, x, width, top, title, style);
        if let Some(score) = final_score {
            let text = format!("score {score}");
            put_centered(fb, x, width, top + 1, &text, Style::new(VALUE, OVERLAY_BG));
            put_centered(fb, x, width, top + 3, "r to reset", Style::new(LABEL, OVERLAY_BG));
        }
    }
}

fn put_centered(fb: &mut FrameBuffer, x: u16, width: u16, y: u16, text: &str, style: Style) {
    let len = text.chars().count() as u16;
    fb.put_str(x + width.saturating_sub(len) / 2, y, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameState, Grid, Tetromino};
    use crate::types::Color;

    fn frame(state: &GameState) -> FrameBuffer {
        GameView::new().render(&state.snapshot(), Viewport::minimum())
    }

    #[test]
    fn empty_board_is_framed() {
        let fb = frame(&GameState::new());
        assert!(fb.row_text(0).starts_with("┌────────────────────┐"));
        assert!(fb.row_text(11).starts_with("└────────────────────┘"));
        assert!(fb.row_text(1).starts_with("│ · · · · · · · · · ·│"));
    }

    #[test]
    fn pieces_and_settled_cells_use_palette_colors() {
        let grid = Grid::new().with_cell(0, 9, Some(Color::Green));
        let piece = Tetromino::from_coords([(3, 0), (4, 0), (5, 0), (6, 0)], Color::Blue);
        let snap = GameState::with_grid(grid).with_piece(piece).snapshot();
        let view = GameView::new();
        let fb = view.render(&snap, Viewport::minimum());
        let origin = view.board_origin(Viewport::minimum());

        let (x, y) = origin.cell(4, 0);
        let active = fb.get(x, y).unwrap();
        assert_eq!(active.ch, '█');
        assert_eq!(active.style.fg, Rgb::from(Color::Blue));

        let (x, y) = origin.cell(0, 9);
        let settled = fb.get(x, y).unwrap();
        assert_eq!(settled.ch, '█');
        assert_eq!(settled.style.fg, Rgb::from(Color::Green).shade(200));
    }

    #[test]
    fn panel_shows_counters() {
        let state = GameState::new().with_score(1350);
        let fb = frame(&state);
        let text: Vec<String> = (0..fb.height()).map(|y| fb.row_text(y)).collect();
        assert!(text[0].contains("SCORE"));
        assert!(text[1].contains("1350"));
        assert!(text[3].contains('2'));
        assert!(text[4].contains("TURNS"));
        assert!(text[7].trim_end().ends_with('-'));
    }

    #[test]
    fn small_viewport_asks_for_more_room() {
        let fb = GameView::new().render(&GameState::new().snapshot(), Viewport::new(20, 5));
        assert!(fb.row_text(2).contains("enlarge terminal"));
    }
}
