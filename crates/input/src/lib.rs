//! Keyboard mapping for the terminal frontend.
//!
//! Turns `crossterm` key events into [`crate::types::GameAction`]s. Each press
//! is one intent; there is no auto-repeat of its own, the terminal's key
//! repeat is passed through as repeated presses.

pub mod map;

pub use tetra_turns_types as types;

pub use map::{handle_key_event, key_intent, should_quit, KeyIntent};
