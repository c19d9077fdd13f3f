//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are plain data with no behavior beyond conversions, making them
//! usable in any context (core logic, engine, terminal rendering, snapshot logs).
//!
//! # Grid Dimensions
//!
//! The playfield is square so that it can be turned a quarter at a time:
//!
//! - **Side**: 10 cells (indexed 0-9 in both directions)
//! - **Spawn column offset**: `GRID_SIZE / 2 - 1` (4)
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_SPEED_MS` | 1000 | Gravity period at level 1 |
//! | `SPEED_INCREASE` | 0.85 | Gravity period factor per level |
//! | `ROTATION_INTERVAL_MS` | 15000 | Period of the whole-grid rotation |
//!
//! # Scoring Constants
//!
//! | Constant | Value |
//! |----------|-------|
//! | `POINTS_PER_LINE` | 100 |
//! | `POINTS_MULTIPLIER` | 1.5 (stored as 3/2) |
//! | `LEVEL_THRESHOLD` | 1000 points per level |
//!
//! # Examples
//!
//! ```
//! use tetra_turns_types::{Color, GameAction, Rotation, GRID_SIZE};
//!
//! assert_eq!(GRID_SIZE, 10);
//! assert_eq!(Color::Orange.hex(), "#FFA500");
//! assert_eq!(Rotation::Deg270.rotate_cw(), Rotation::Deg0);
//! assert_eq!(GameAction::from_str("rotatePiece"), Some(GameAction::RotatePiece));
//! ```

use serde::Serialize;

/// Side length of the square grid (10 cells)
pub const GRID_SIZE: u8 = 10;

/// Gravity period at level 1 in milliseconds
pub const INITIAL_SPEED_MS: u64 = 1000;

/// Gravity period multiplier applied once per level above 1
pub const SPEED_INCREASE: f64 = 0.85;

/// Fastest gravity period the clock will arm (1ms)
pub const MIN_GRAVITY_MS: f64 = 1.0;

/// Period of the whole-grid rotation in milliseconds (15 seconds)
pub const ROTATION_INTERVAL_MS: u64 = 15_000;

/// Base points for one cleared line
pub const POINTS_PER_LINE: u64 = 100;

/// Multi-line multiplier numerator (3/2 = 1.5x per extra line)
pub const POINTS_MULTIPLIER_NUMERATOR: u64 = 3;

/// Multi-line multiplier denominator
pub const POINTS_MULTIPLIER_DENOMINATOR: u64 = 2;

/// Score needed per level
pub const LEVEL_THRESHOLD: u64 = 1000;

/// Number of colors in the palette
pub const PALETTE_SIZE: usize = 7;


/// The seven palette colors
///
/// A color is only a visual tag; gameplay treats any colored cell as occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
    Orange,
}

impl Color {
    /// Palette order used for random selection
    pub const ALL: [Color; PALETTE_SIZE] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::Orange,
    ];

    /// CSS-style hex tag
    ///
    /// # Examples
    ///
    /// ```
    /// use tetra_turns_types::Color;
    ///
    /// assert_eq!(Color::Red.hex(), "#FF0000");
    /// assert_eq!(Color::Cyan.hex(), "#00FFFF");
    /// ```
    pub fn hex(&self) -> &'static str {
        match self {
            Color::Red => "#FF0000",
            Color::Green => "#00FF00",
            Color::Blue => "#0000FF",
            Color::Yellow => "#FFFF00",
            Color::Magenta => "#FF00FF",
            Color::Cyan => "#00FFFF",
            Color::Orange => "#FFA500",
        }
    }

    /// RGB triple matching [`Color::hex`]
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Red => (255, 0, 0),
            Color::Green => (0, 255, 0),
            Color::Blue => (0, 0, 255),
            Color::Yellow => (255, 255, 0),
            Color::Magenta => (255, 0, 255),
            Color::Cyan => (0, 255, 255),
            Color::Orange => (255, 165, 0),
        }
    }
}

/// Cosmetic orientation of the active piece
///
/// Advances by a quarter turn every time the piece is rotated. Collision logic
/// never reads it; the presentation layer may use it to turn the piece container.
///
/// The cycle goes: 0° → 90° → 180° → 270° → 0°
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Advance by 90° clockwise
    ///
    /// # Examples
    ///
    /// ```
    /// use tetra_turns_types::Rotation;
    ///
    /// assert_eq!(Rotation::Deg0.rotate_cw(), Rotation::Deg90);
    /// assert_eq!(Rotation::Deg90.rotate_cw(), Rotation::Deg180);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    /// Angle in degrees (0, 90, 180 or 270)
    pub fn degrees(&self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }
}

impl Serialize for Rotation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.degrees())
    }
}

/// Intents forwarded by the presentation layer
///
/// Each intent maps 1:1 to a state transition of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Rotate piece 90° clockwise about its pivot block
    RotatePiece,
    /// Flip the paused flag
    TogglePause,
    /// Replace the whole game with a fresh one
    Reset,
}

impl GameAction {
    pub const ALL: [GameAction; 6] = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::RotatePiece,
        GameAction::TogglePause,
        GameAction::Reset,
    ];

    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetra_turns_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("TOGGLEPAUSE"), Some(GameAction::TogglePause));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotatepiece" => Some(GameAction::RotatePiece),
            "togglepause" => Some(GameAction::TogglePause),
            "reset" => Some(GameAction::Reset),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::RotatePiece => "rotatePiece",
            GameAction::TogglePause => "togglePause",
            GameAction::Reset => "reset",
        }
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(Color)`: Settled block of the given color
pub type Cell = Option<Color>;
