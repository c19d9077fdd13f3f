//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules for a falling-block game whose
//! whole field turns a quarter clockwise every few seconds.
//! It has **zero dependencies** on timers, UI or I/O, making it:
//!
//! - **Deterministic**: The random source is injected, so games replay exactly
//! - **Testable**: Every rule is a plain function of the current state
//! - **Functional**: Transitions return the next [`GameState`] instead of mutating
//!
//! # Module Structure
//!
//! - [`grid`]: 10x10 field with line clearing and the quarter-turn remap
//! - [`pieces`]: Shape catalog, collision checks and pivot rotation
//! - [`rng`]: Injectable random source for spawning
//! - [`scoring`]: Line-clear points, levels and gravity period
//! - [`game_state`]: The aggregate and its transitions
//! - [`snapshot`]: Read-only copy handed to renderers and observers
//!
//! # Game Rules
//!
//! - **Gravity**: Each tick spawns a piece when none is active, otherwise the
//!   piece falls one row or locks when it cannot
//! - **Rotation**: 90° clockwise about the second block, rejected outright when
//!   any block would leave the field or overlap (no wall kicks)
//! - **Grid rotation**: The settled blocks and the active piece turn together
//! - **Scoring**: `100 * lines * 1.5^(lines-1)` per lock, level every 1000 points
//! - **Game over**: A freshly spawned piece that collides ends the game
//!
//! # Example
//!
//! ```
//! use tetra_turns_core::{GameState, SequenceRng};
//! use tetra_turns_types::GameAction;
//!
//! let mut rng = SequenceRng::new(vec![0, 5]);
//! let state = GameState::new().gravity_tick(&mut rng);
//! assert!(state.current_piece().is_some());
//!
//! let moved = state.apply_action(GameAction::MoveLeft);
//! assert_ne!(moved, state);
//! ```

pub mod game_state;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetra_turns_types as types;

// Re-export commonly used types for convenience
pub use game_state::{GameState, LockEvent};
pub use grid::Grid;
pub use pieces::{Block, Tetromino, SHAPES};
pub use rng::{RandomSource, SequenceRng, SimpleRng};
pub use scoring::{gravity_interval, level_for_score, line_clear_points};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
