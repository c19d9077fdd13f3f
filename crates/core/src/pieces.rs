//! Pieces module - tetromino shapes, collision and rotation
//!
//! A piece is four colored blocks in absolute grid coordinates. The block at
//! index 1 is the pivot. There is no kick table: a rotation either fits where
//! it lands or is rejected.

use crate::grid::Grid;
use crate::types::{Color, Rotation, GRID_SIZE};

/// Offset of a single block relative to the spawn column
pub type BlockOffset = (i8, i8);

/// Shape of a piece - 4 block offsets, index 1 is the pivot
pub type PieceShape = [BlockOffset; 4];

/// Index of the pivot block inside every piece
pub const PIVOT_INDEX: usize = 1;

/// Column added to every shape offset on spawn
pub const SPAWN_X_OFFSET: i8 = (GRID_SIZE / 2) as i8 - 1;

/// The fixed shape catalog (I, O, T, S, Z, J, L)
///
/// Offsets with `y = -1` start above the visible field so pieces enter staggered.
pub const SHAPES: [PieceShape; 7] = [
    // I
    [(0, 0), (1, 0), (2, 0), (3, 0)],
    // O
    [(0, -1), (0, 0), (1, -1), (1, 0)],
    // T
    [(0, 0), (1, 0), (2, 0), (1, -1)],
    // S
    [(0, 0), (1, 0), (1, -1), (2, -1)],
    // Z
    [(0, -1), (1, -1), (1, 0), (2, 0)],
    // J
    [(0, -1), (0, 0), (1, 0), (2, 0)],
    // L
    [(0, 0), (1, 0), (2, 0), (2, -1)],
];

/// A single block of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub x: i8,
    pub y: i8,
    pub color: Color,
}

impl Block {
    fn shifted(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub blocks: [Block; 4],
    pub rotation: Rotation,
}

impl Tetromino {
    /// Create a piece from a catalog shape, centered horizontally
    pub fn spawn(shape: &PieceShape, color: Color) -> Self {
        Self {
            blocks: shape.map(|(x, y)| Block {
                x: x + SPAWN_X_OFFSET,
                y,
                color,
            }),
            rotation: Rotation::Deg0,
        }
    }

    /// Create a piece at absolute coordinates (for fixtures and tests)
    pub fn from_coords(coords: [(i8, i8); 4], color: Color) -> Self {
        Self {
            blocks: coords.map(|(x, y)| Block { x, y, color }),
            rotation: Rotation::Deg0,
        }
    }

    /// The pivot block
    pub fn pivot(&self) -> Block {
        self.blocks[PIVOT_INDEX]
    }

    pub fn color(&self) -> Color {
        self.blocks[0].color
    }

    /// Absolute block coordinates
    pub fn coords(&self) -> [(i8, i8); 4] {
        self.blocks.map(|b| (b.x, b.y))
    }

    /// Copy of the piece with every block shifted by (dx, dy)
    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            blocks: self.blocks.map(|b| b.shifted(dx, dy)),
            ..*self
        }
    }

    /// Check whether the piece, displaced by (dx, dy), hits a wall, the floor
    /// or a settled cell.
    ///
    /// Blocks above the field (`y < 0`) only check the side walls.
    pub fn collides(&self, grid: &Grid, dx: i8, dy: i8) -> bool {
        self.blocks.iter().any(|b| {
            let x = b.x + dx;
            let y = b.y + dy;
            x < 0 || x >= GRID_SIZE as i8 || y >= GRID_SIZE as i8 || (y >= 0 && grid.is_occupied(x, y))
        })
    }

    /// Rotation acceptance rule: every block inside the field and on an empty cell
    pub fn fits(&self, grid: &Grid) -> bool {
        self.blocks.iter().all(|b| grid.is_vacant(b.x, b.y))
    }

    /// Rotate 90° clockwise about the pivot block.
    ///
    /// Returns the rotated piece (cosmetic rotation advanced by 90°) if it fits,
    /// otherwise an unchanged copy of `self`.
    pub fn rotate_about_pivot(&self, grid: &Grid) -> Self {
        let pivot = self.pivot();
        let candidate = Self {
            blocks: self.blocks.map(|b| Block {
                x: pivot.x - (b.y - pivot.y),
                y: pivot.y + (b.x - pivot.x),
                color: b.color,
            }),
            rotation: self.rotation.rotate_cw(),
        };

        if candidate.fits(grid) {
            candidate
        } else {
            *self
        }
    }

    /// Map every block through the whole-grid quarter turn, `(y, x) -> (x, N-1-y)`.
    ///
    /// This is the same relabeling [`Grid::rotate_quadrant`] applies to cells.
    /// The result is not validated; blocks above the field land outside it.
    pub fn project_quadrant(&self) -> Self {
        let last = GRID_SIZE as i8 - 1;
        Self {
            blocks: self.blocks.map(|b| Block {
                x: last - b.y,
                y: b.x,
                color: b.color,
            }),
            rotation: self.rotation.rotate_cw(),
        }
    }
}
