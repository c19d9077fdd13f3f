//! Game state module - the single aggregate of a running game
//!
//! This module ties together the grid, pieces, random source and scoring.
//! Every transition takes `&self` and returns the complete next state; nothing
//! is mutated in place, so whoever owns the current value decides when the
//! next one is committed. Rejected transitions return an unchanged copy.

use serde::Serialize;

use crate::grid::Grid;
use crate::pieces::{Tetromino, SHAPES};
use crate::rng::RandomSource;
use crate::scoring::{gravity_interval, level_for_score, line_clear_points};
use crate::snapshot::GameSnapshot;
use crate::types::{Color, GameAction};

use std::time::Duration;

/// Outcome of the most recent lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub points: u64,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    grid: Grid,
    current_piece: Option<Tetromino>,
    score: u64,
    level: u32,
    game_over: bool,
    paused: bool,
    /// Number of whole-grid rotations applied so far.
    grid_rotations: u32,
    /// Set on lock, cleared when the next piece spawns.
    last_lock: Option<LockEvent>,
}

impl GameState {
    /// Fresh game: empty grid, score 0, level 1, no piece, not paused
    pub fn new() -> Self {
        Self {
            grid: Grid::new(),
            current_piece: None,
            score: 0,
            level: 1,
            game_over: false,
            paused: false,
            grid_rotations: 0,
            last_lock: None,
        }
    }

    /// Fresh game on a prepared grid
    pub fn with_grid(grid: Grid) -> Self {
        Self {
            grid,
            ..Self::new()
        }
    }

    /// Install an active piece as-is (fixtures and replays)
    pub fn with_piece(self, piece: Tetromino) -> Self {
        Self {
            current_piece: Some(piece),
            ..self
        }
    }

    /// Set the cumulative score; the level follows from it
    pub fn with_score(self, score: u64) -> Self {
        Self {
            score,
            level: level_for_score(score),
            ..self
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_piece(&self) -> Option<&Tetromino> {
        self.current_piece.as_ref()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn grid_rotations(&self) -> u32 {
        self.grid_rotations
    }

    pub fn last_lock(&self) -> Option<LockEvent> {
        self.last_lock
    }

    /// Gameplay advances only while neither paused nor over
    pub fn is_running(&self) -> bool {
        !self.paused && !self.game_over
    }

    /// Current gravity period for this level
    pub fn gravity_interval(&self) -> Duration {
        gravity_interval(self.level)
    }

    /// Shift the active piece by (dx, dy) if the destination is free
    pub fn try_move(&self, dx: i8, dy: i8) -> Self {
        let Some(piece) = self.current_piece.filter(|_| self.is_running()) else {
            return self.clone();
        };

        let candidate = piece.translated(dx, dy);
        if candidate.collides(&self.grid, 0, 0) {
            return self.clone();
        }

        Self {
            current_piece: Some(candidate),
            ..self.clone()
        }
    }

    /// Rotate the active piece about its pivot, all-or-nothing
    pub fn rotate_piece(&self) -> Self {
        let Some(piece) = self.current_piece.filter(|_| self.is_running()) else {
            return self.clone();
        };

        Self {
            current_piece: Some(piece.rotate_about_pivot(&self.grid)),
            ..self.clone()
        }
    }

    /// Create a random piece, or end the game if it cannot enter the field
    ///
    /// No-op while a piece is active, paused or over.
    pub fn spawn_piece<R: RandomSource>(&self, rng: &mut R) -> Self {
        if !self.is_running() || self.current_piece.is_some() {
            return self.clone();
        }

        let shape = &SHAPES[rng.next_below(SHAPES.len() as u32) as usize];
        let color = Color::ALL[rng.next_below(Color::ALL.len() as u32) as usize];
        let piece = Tetromino::spawn(shape, color);

        if piece.collides(&self.grid, 0, 0) {
            return Self {
                game_over: true,
                ..self.clone()
            };
        }

        Self {
            current_piece: Some(piece),
            last_lock: None,
            ..self.clone()
        }
    }

    /// Write the active piece into the grid, clear full rows and score them
    ///
    /// Blocks still above the field are dropped.
    pub fn lock_piece(&self) -> Self {
        let Some(piece) = self.current_piece.filter(|_| self.is_running()) else {
            return self.clone();
        };

        let mut grid = self.grid.clone();
        for block in piece.blocks.iter().filter(|b| b.y >= 0) {
            grid.set(block.x, block.y, Some(block.color));
        }

        let (grid, cleared) = grid.clear_lines();
        let points = line_clear_points(cleared.len());
        let score = self.score.saturating_add(points);

        Self {
            grid,
            current_piece: None,
            score,
            level: level_for_score(score),
            last_lock: Some(LockEvent {
                lines_cleared: cleared.len() as u32,
                points,
            }),
            ..self.clone()
        }
    }

    /// One gravity step: spawn when empty, otherwise fall one row or lock
    pub fn gravity_tick<R: RandomSource>(&self, rng: &mut R) -> Self {
        if !self.is_running() {
            return self.clone();
        }

        match self.current_piece {
            None => self.spawn_piece(rng),
            Some(piece) if piece.collides(&self.grid, 0, 1) => self.lock_piece(),
            Some(_) => self.try_move(0, 1),
        }
    }

    /// Turn the whole grid a quarter clockwise, carrying the active piece along
    ///
    /// The piece is relabeled with the grid mapping and kept there if every block
    /// lands inside the field on an empty cell. Otherwise it stays at its old
    /// coordinates when those are still free, and is discarded when they are not
    /// (the next gravity tick spawns a replacement).
    pub fn rotation_tick(&self) -> Self {
        if !self.is_running() {
            return self.clone();
        }

        let grid = self.grid.rotate_quadrant();
        let current_piece = self.current_piece.and_then(|piece| {
            let projected = piece.project_quadrant();
            if projected.fits(&grid) {
                Some(projected)
            } else if !piece.collides(&grid, 0, 0) {
                Some(piece)
            } else {
                None
            }
        });

        Self {
            grid,
            current_piece,
            grid_rotations: self.grid_rotations.wrapping_add(1),
            ..self.clone()
        }
    }

    /// Flip the paused flag (allowed even when the game is over)
    pub fn toggle_pause(&self) -> Self {
        Self {
            paused: !self.paused,
            ..self.clone()
        }
    }

    /// Replace the whole game with a fresh one
    pub fn reset(&self) -> Self {
        Self::new()
    }

    /// Apply a player intent
    pub fn apply_action(&self, action: GameAction) -> Self {
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.try_move(0, 1),
            GameAction::RotatePiece => self.rotate_piece(),
            GameAction::TogglePause => self.toggle_pause(),
            GameAction::Reset => self.reset(),
        }
    }

    /// Read-only copy for renderers and observers
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(self)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRng;
    use crate::types::Rotation;

    fn i_piece_at(x: i8, y: i8) -> Tetromino {
        Tetromino::from_coords([(x, y), (x + 1, y), (x + 2, y), (x + 3, y)], Color::Cyan)
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new();
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert!(state.current_piece().is_none());
        assert!(!state.game_over());
        assert!(!state.paused());
        assert_eq!(state.grid().occupied_count(), 0);
    }

    #[test]
    fn test_first_gravity_tick_spawns() {
        // Shape 0 (I), color 5 (cyan)
        let mut rng = SequenceRng::new(vec![0, 5]);
        let state = GameState::new().gravity_tick(&mut rng);
        let piece = state.current_piece().unwrap();
        assert_eq!(piece.coords(), [(4, 0), (5, 0), (6, 0), (7, 0)]);
        assert_eq!(piece.color(), Color::Cyan);
    }

    #[test]
    fn test_gravity_tick_falls_one_row() {
        let mut rng = SequenceRng::new(vec![0]);
        let state = GameState::new().with_piece(i_piece_at(0, 3));
        let next = state.gravity_tick(&mut rng);
        assert_eq!(next.current_piece().unwrap().coords()[0], (0, 4));
    }

    #[test]
    fn test_gravity_tick_locks_at_floor() {
        let mut rng = SequenceRng::new(vec![0]);
        let state = GameState::new().with_piece(i_piece_at(2, 9));
        let next = state.gravity_tick(&mut rng);

        assert!(next.current_piece().is_none());
        for x in 2..6 {
            assert_eq!(next.grid().get(x, 9), Some(Some(Color::Cyan)));
        }
        assert_eq!(
            next.last_lock(),
            Some(LockEvent {
                lines_cleared: 0,
                points: 0
            })
        );
    }

    #[test]
    fn test_lock_clears_line_and_scores() {
        let mut grid = Grid::new();
        for x in 4..10 {
            grid.set(x, 9, Some(Color::Red));
        }
        let state = GameState::with_grid(grid).with_piece(i_piece_at(0, 9));
        let next = state.lock_piece();

        assert_eq!(next.score(), 100);
        assert_eq!(next.grid().occupied_count(), 0);
        assert_eq!(next.last_lock().unwrap().lines_cleared, 1);
    }

    #[test]
    fn test_lock_drops_blocks_above_field() {
        let piece = Tetromino::from_coords([(4, -1), (4, 0), (5, 0), (6, 0)], Color::Blue);
        let next = GameState::new().with_piece(piece).lock_piece();
        assert_eq!(next.grid().occupied_count(), 3);
    }

    #[test]
    fn test_lock_updates_level() {
        let mut grid = Grid::new().with_full_rows(&[8], Color::Red);
        for x in 4..10 {
            grid.set(x, 9, Some(Color::Red));
        }
        let piece = Tetromino::from_coords([(0, 9), (1, 9), (2, 9), (3, 9)], Color::Green);
        let state = GameState::with_grid(grid).with_piece(piece).with_score(800);
        let next = state.lock_piece();

        // Row 9 completes; row 8 was already full.
        assert_eq!(next.score(), 800 + 300);
        assert_eq!(next.level(), 2);
    }

    #[test]
    fn test_spawn_collision_sets_game_over() {
        let grid = Grid::new().with_full_rows(&[0], Color::Red);
        let mut rng = SequenceRng::new(vec![0, 0]);
        let state = GameState::with_grid(grid.clone());
        let next = state.gravity_tick(&mut rng);

        assert!(next.game_over());
        assert!(next.current_piece().is_none());
        assert_eq!(next.grid(), &grid);
    }

    #[test]
    fn test_blocked_transitions_return_same_state() {
        let state = GameState::new().with_piece(i_piece_at(3, 4)).toggle_pause();
        assert_eq!(state.try_move(1, 0), state);
        assert_eq!(state.rotate_piece(), state);
        assert_eq!(state.rotation_tick(), state);
        let mut rng = SequenceRng::new(vec![1]);
        assert_eq!(state.gravity_tick(&mut rng), state);
    }

    #[test]
    fn test_toggle_pause_and_reset() {
        let state = GameState::new().with_score(4200).toggle_pause();
        assert!(state.paused());
        assert!(!state.toggle_pause().paused());
        assert_eq!(state.apply_action(GameAction::Reset), GameState::new());
    }

    #[test]
    fn test_rotation_tick_projects_piece() {
        let piece = i_piece_at(2, 5);
        let state = GameState::new().with_piece(piece);
        let next = state.rotation_tick();

        let moved = next.current_piece().unwrap();
        // (x, y) -> (9 - y, x)
        assert_eq!(moved.coords(), [(4, 2), (4, 3), (4, 4), (4, 5)]);
        assert_eq!(moved.rotation, Rotation::Deg90);
        assert_eq!(next.grid_rotations(), 1);
    }

    #[test]
    fn test_rotation_tick_keeps_piece_above_field() {
        let piece = Tetromino::from_coords([(4, -1), (4, 0), (5, 0), (6, 0)], Color::Blue);
        let next = GameState::new().with_piece(piece).rotation_tick();
        assert_eq!(next.current_piece(), Some(&piece));
    }

    #[test]
    fn test_rotation_tick_discards_piece_that_cannot_stay() {
        // After the turn, the left column holds the old bottom row.
        let grid = Grid::new().with_full_rows(&[9], Color::Red);
        let piece = Tetromino::from_coords([(0, -1), (0, 0), (1, 0), (2, 0)], Color::Blue);
        let next = GameState::with_grid(grid).with_piece(piece).rotation_tick();
        assert!(next.current_piece().is_none());
    }
}
