//! Grid module - the square playfield
//!
//! The grid is a 10x10 matrix where each cell is empty or holds a color.
//! Uses a flat array for cache locality; dimensions never change after creation.
//! Coordinates: (x, y) where x is the column (left to right) and y the row (top to bottom).
//!
//! Transforms that reshape the whole field ([`Grid::rotate_quadrant`],
//! [`Grid::clear_lines`]) return a new grid and leave `self` untouched.

use arrayvec::ArrayVec;

use crate::types::{Cell, Color, GRID_SIZE};

/// Side length as usize
const N: usize = GRID_SIZE as usize;

/// Total number of cells on the grid
const GRID_CELLS: usize = N * N;

/// Row indices removed by one [`Grid::clear_lines`] call (top to bottom)
pub type ClearedRows = ArrayVec<usize, N>;

/// The playfield - N columns x N rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * N + x)
    cells: [Cell; GRID_CELLS],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_CELLS],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if Self::is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * N + (x as usize))
    }

    /// Side length of the grid
    pub fn size(&self) -> u8 {
        GRID_SIZE
    }

    /// Check if position lies outside `[0,N) x [0,N)`
    pub fn is_out_of_bounds(x: i8, y: i8) -> bool {
        x < 0 || x >= GRID_SIZE as i8 || y < 0 || y >= GRID_SIZE as i8
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Copy of this grid with one cell replaced
    pub fn with_cell(&self, x: i8, y: i8, cell: Cell) -> Self {
        let mut next = self.clone();
        next.set(x, y, cell);
        next
    }

    /// Check if position is inside the grid and empty
    pub fn is_vacant(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is inside the grid and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Borrow one row
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= N {
            return None;
        }
        let start = y * N;
        Some(&self.cells[start..start + N])
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(N)
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rotate the whole grid 90° clockwise about its center.
    ///
    /// The cell at row `y`, column `x` moves to row `x`, column `N-1-y`.
    /// Four applications yield the original grid.
    pub fn rotate_quadrant(&self) -> Self {
        let mut next = Self::new();
        for y in 0..N {
            for x in 0..N {
                next.cells[x * N + (N - 1 - y)] = self.cells[y * N + x];
            }
        }
        next
    }

    /// Remove every full row and pad the top with empty rows.
    ///
    /// Surviving rows keep their relative order. Returns the new grid and the
    /// indices (in the input grid) of the rows that were removed.
    pub fn clear_lines(&self) -> (Self, ClearedRows) {
        let mut cleared = ClearedRows::new();
        let mut next = Self::new();
        let mut write_y = N;

        // Scan from bottom to top, compacting survivors downward.
        for read_y in (0..N).rev() {
            if self.is_row_full(read_y) {
                cleared.push(read_y);
                continue;
            }
            write_y -= 1;
            let src = read_y * N;
            let dst = write_y * N;
            next.cells[dst..dst + N].copy_from_slice(&self.cells[src..src + N]);
        }

        cleared.reverse();
        (next, cleared)
    }

    /// Build a grid from rows of colors for tests and fixtures.
    ///
    /// Missing rows and columns stay empty; extra ones are ignored.
    pub fn from_rows(rows: &[[Cell; N]]) -> Self {
        let mut grid = Self::new();
        for (y, row) in rows.iter().take(N).enumerate() {
            grid.cells[y * N..y * N + N].copy_from_slice(row);
        }
        grid
    }

    /// Copy of this grid with the given rows completely filled.
    pub fn with_full_rows(&self, rows: &[usize], color: Color) -> Self {
        let mut next = self.clone();
        for &y in rows.iter().filter(|&&y| y < N) {
            next.cells[y * N..y * N + N].fill(Some(color));
        }
        next
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
