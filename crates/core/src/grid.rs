//! Grid module - the playfield cell matrix
//!
//! The grid is a fixed 20x10 matrix stored as a flat row-major array.
//! Each cell holds `0` (empty) or the id of the piece that was locked there.
//! Coordinates: (row, column) where row ranges 0..19 (top to bottom) and
//! column ranges 0..9 (left to right).
//!
//! There are no sentinel border cells: every query bounds-checks, so
//! [`Grid::is_empty`] is safe on any coordinate and simply reports `false`
//! outside the playfield.

use crate::types::{Cell, PieceKind, EMPTY_CELL, GRID_COLUMNS, GRID_ROWS};

const ROWS: usize = GRID_ROWS as usize;
const COLUMNS: usize = GRID_COLUMNS as usize;

/// Total number of cells on the grid
const GRID_SIZE: usize = ROWS * COLUMNS;

/// The playfield - 20 rows x 10 columns using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Row-major cells (row * COLUMNS + column)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [EMPTY_CELL; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(row: i8, column: i8) -> Option<usize> {
        if !Self::in_bounds(row, column) {
            return None;
        }
        Some((row as usize) * COLUMNS + (column as usize))
    }

    #[inline(always)]
    fn in_bounds(row: i8, column: i8) -> bool {
        row >= 0 && (row as usize) < ROWS && column >= 0 && (column as usize) < COLUMNS
    }

    pub fn rows(&self) -> u8 {
        GRID_ROWS
    }

    pub fn columns(&self) -> u8 {
        GRID_COLUMNS
    }

    /// True iff `(row, column)` is inside the playable area.
    pub fn is_inside(&self, row: i8, column: i8) -> bool {
        Self::in_bounds(row, column)
    }

    /// True iff the cell is inside the grid and holds no piece.
    pub fn is_empty(&self, row: i8, column: i8) -> bool {
        matches!(self.get(row, column), Some(EMPTY_CELL))
    }

    /// Cell value at `(row, column)`, `None` when out of bounds.
    pub fn get(&self, row: i8, column: i8) -> Option<Cell> {
        Self::index(row, column).map(|idx| self.cells[idx])
    }

    /// Write a piece id into a cell.
    ///
    /// Returns false (and writes nothing) when the cell is out of bounds.
    pub fn set_cell(&mut self, row: i8, column: i8, kind: PieceKind) -> bool {
        match Self::index(row, column) {
            Some(idx) => {
                self.cells[idx] = kind.id();
                true
            }
            None => false,
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= ROWS {
            return false;
        }
        self.row_cells(row).iter().all(|&cell| cell != EMPTY_CELL)
    }

    /// Cells of one row, left to right, or `None` off the grid.
    pub fn row(&self, row: i8) -> Option<&[Cell]> {
        if row < 0 || row as usize >= ROWS {
            return None;
        }
        Some(self.row_cells(row as usize))
    }

    fn row_cells(&self, row: usize) -> &[Cell] {
        let start = row * COLUMNS;
        &self.cells[start..start + COLUMNS]
    }

    /// Remove every full row at once and let the rows above fall.
    ///
    /// Scans bottom to top keeping a write cursor: non-full rows are copied
    /// down to the cursor (i.e. shifted by the number of full rows found below
    /// them so far), full rows are skipped. The `k` rows left at the top are
    /// emptied. Returns `k`.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0u32;
        let mut write_row = ROWS;

        for read_row in (0..ROWS).rev() {
            if self.is_row_full(read_row) {
                cleared += 1;
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let src = read_row * COLUMNS;
                self.cells
                    .copy_within(src..src + COLUMNS, write_row * COLUMNS);
            }
        }

        self.cells[..write_row * COLUMNS].fill(EMPTY_CELL);
        cleared
    }

    /// Empty every cell. Dimensions never change.
    pub fn reset(&mut self) {
        self.cells.fill(EMPTY_CELL);
    }

    /// Number of non-empty cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY_CELL).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid into a 2D array (for snapshots / rendering)
    pub fn write_rows(&self, out: &mut [[Cell; COLUMNS]; ROWS]) {
        for (row, dst) in out.iter_mut().enumerate() {
            dst.copy_from_slice(self.row_cells(row));
        }
    }

    /// Fill a whole row with one piece id (test helper)
    #[cfg(test)]
    pub(crate) fn fill_row(&mut self, row: usize, kind: PieceKind) {
        let start = row * COLUMNS;
        self.cells[start..start + COLUMNS].fill(kind.id());
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(0, 0), Some(0));
        assert_eq!(Grid::index(0, 9), Some(9));
        assert_eq!(Grid::index(1, 0), Some(10));
        assert_eq!(Grid::index(19, 9), Some(199));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(0, 10), None);
        assert_eq!(Grid::index(20, 0), None);
    }

    #[test]
    fn test_is_inside_bounds() {
        let grid = Grid::new();
        assert!(grid.is_inside(0, 0));
        assert!(grid.is_inside(19, 9));
        assert!(!grid.is_inside(-1, 5));
        assert!(!grid.is_inside(20, 5));
        assert!(!grid.is_inside(5, -1));
        assert!(!grid.is_inside(5, 10));
    }

    #[test]
    fn test_is_empty_is_false_out_of_bounds() {
        let grid = Grid::new();
        assert!(grid.is_empty(10, 5));
        assert!(!grid.is_empty(-1, 5));
        assert!(!grid.is_empty(10, 10));
    }

    #[test]
    fn test_set_cell_writes_piece_id() {
        let mut grid = Grid::new();
        assert!(grid.set_cell(5, 3, PieceKind::T));
        assert_eq!(grid.get(5, 3), Some(PieceKind::T.id()));
        assert!(!grid.is_empty(5, 3));
        assert!(!grid.set_cell(20, 0, PieceKind::T));
        assert_eq!(grid.filled_count(), 1);
    }

    #[test]
    fn test_clear_rows_two_and_five() {
        let mut grid = Grid::new();
        grid.fill_row(2, PieceKind::I);
        grid.fill_row(5, PieceKind::I);
        // Markers above, between and below the full rows.
        grid.set_cell(0, 0, PieceKind::L);
        grid.set_cell(1, 1, PieceKind::J);
        grid.set_cell(3, 2, PieceKind::S);
        grid.set_cell(4, 3, PieceKind::Z);
        grid.set_cell(6, 4, PieceKind::T);

        assert_eq!(grid.clear_full_rows(), 2);

        // Rows above both clears drop by 2, rows between drop by 1, rows below stay.
        assert_eq!(grid.get(2, 0), Some(PieceKind::L.id()));
        assert_eq!(grid.get(3, 1), Some(PieceKind::J.id()));
        assert_eq!(grid.get(4, 2), Some(PieceKind::S.id()));
        assert_eq!(grid.get(5, 3), Some(PieceKind::Z.id()));
        assert_eq!(grid.get(6, 4), Some(PieceKind::T.id()));
        assert!(grid.row(0).unwrap().iter().all(|&c| c == EMPTY_CELL));
        assert!(grid.row(1).unwrap().iter().all(|&c| c == EMPTY_CELL));
        assert_eq!(grid.filled_count(), 5);
    }

    #[test]
    fn test_reset_empties_everything() {
        let mut grid = Grid::new();
        grid.fill_row(19, PieceKind::O);
        grid.reset();
        assert_eq!(grid, Grid::new());
        assert_eq!(grid.rows(), 20);
        assert_eq!(grid.columns(), 10);
    }

    #[test]
    fn test_write_rows() {
        let mut grid = Grid::new();
        grid.set_cell(19, 9, PieceKind::Z);
        let mut out = [[0u8; COLUMNS]; ROWS];
        grid.write_rows(&mut out);
        assert_eq!(out[19][9], 7);
        assert_eq!(out[0][0], 0);
    }
}
