use serde::Serialize;

use crate::game_state::{GameState, LockEvent};
use crate::pieces::Tetromino;
use crate::types::{Cell, Color, Rotation, GRID_SIZE};

const N: usize = GRID_SIZE as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    /// Absolute (x, y) of the four blocks; y may be negative while entering.
    pub blocks: [(i8, i8); 4],
    pub color: Color,
    pub rotation: Rotation,
}

impl From<&Tetromino> for ActiveSnapshot {
    fn from(value: &Tetromino) -> Self {
        Self {
            blocks: value.coords(),
            color: value.color(),
            rotation: value.rotation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    /// Settled cells, `grid[y][x]`.
    pub grid: [[Cell; N]; N],
    pub active: Option<ActiveSnapshot>,
    pub score: u64,
    pub level: u32,
    pub game_over: bool,
    pub paused: bool,
    pub grid_rotations: u32,
    pub last_lock: Option<LockEvent>,
}

impl GameSnapshot {
    /// Settled cells with the active piece drawn on top.
    ///
    /// Blocks outside the field are skipped.
    pub fn composite(&self) -> [[Cell; N]; N] {
        let mut out = self.grid;
        if let Some(active) = self.active {
            for (x, y) in active.blocks {
                if (0..N as i8).contains(&x) && (0..N as i8).contains(&y) {
                    out[y as usize][x as usize] = Some(active.color);
                }
            }
        }
        out
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}

impl From<&GameState> for GameSnapshot {
    fn from(state: &GameState) -> Self {
        let mut grid = [[None; N]; N];
        for (y, row) in state.grid().rows().enumerate() {
            grid[y].copy_from_slice(row);
        }

        Self {
            grid,
            active: state.current_piece().map(ActiveSnapshot::from),
            score: state.score(),
            level: state.level(),
            game_over: state.game_over(),
            paused: state.paused(),
            grid_rotations: state.grid_rotations(),
            last_lock: state.last_lock(),
        }
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self::from(&GameState::new())
    }
}
