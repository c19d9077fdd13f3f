//! Terminal renderer for the rotating board.
//!
//! Draws into a plain framebuffer instead of a widget tree, then flushes only
//! the glyphs that changed. Board cells are two columns wide so the square
//! field looks square in a typical terminal font.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetra_turns_core as core;
pub use tetra_turns_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{BoardOrigin, GameView, Viewport};
pub use renderer::{changed_runs, encode_full, encode_runs, Run, TerminalRenderer, TerminalSession};
