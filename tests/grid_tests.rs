//! Grid tests

use blockfall::core::Grid;
use blockfall::types::{PieceKind, EMPTY_CELL, GRID_COLUMNS, GRID_ROWS};

fn fill_row(grid: &mut Grid, row: i8, kind: PieceKind) {
    for column in 0..GRID_COLUMNS as i8 {
        grid.set_cell(row, column, kind);
    }
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new();
    assert_eq!(grid.rows(), GRID_ROWS);
    assert_eq!(grid.columns(), GRID_COLUMNS);

    for row in 0..GRID_ROWS as i8 {
        for column in 0..GRID_COLUMNS as i8 {
            assert!(grid.is_inside(row, column));
            assert!(
                grid.is_empty(row, column),
                "cell ({}, {}) should be empty",
                row,
                column
            );
        }
    }
}

#[test]
fn test_grid_out_of_bounds() {
    let grid = Grid::new();
    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(GRID_ROWS as i8, 0), None);
    assert_eq!(grid.get(0, GRID_COLUMNS as i8), None);
    assert!(!grid.is_empty(GRID_ROWS as i8, 0));
    assert!(grid.row(-1).is_none());
    assert!(grid.row(GRID_ROWS as i8).is_none());
    assert_eq!(grid.row(GRID_ROWS as i8 - 1).map(|r| r.len()), Some(GRID_COLUMNS as usize));
}

#[test]
fn test_is_row_full() {
    let mut grid = Grid::new();
    for column in 0..9 {
        grid.set_cell(19, column, PieceKind::T);
    }
    assert!(!grid.is_row_full(19));
    grid.set_cell(19, 9, PieceKind::T);
    assert!(grid.is_row_full(19));
    assert!(!grid.is_row_full(100));
}

#[test]
fn test_clear_no_rows() {
    let mut grid = Grid::new();
    grid.set_cell(19, 0, PieceKind::L);
    let before = grid.clone();
    assert_eq!(grid.clear_full_rows(), 0);
    assert_eq!(grid, before);
}

#[test]
fn test_clear_four_bottom_rows() {
    let mut grid = Grid::new();
    for row in 16..20 {
        fill_row(&mut grid, row, PieceKind::I);
    }
    grid.set_cell(15, 4, PieceKind::O);

    assert_eq!(grid.clear_full_rows(), 4);
    assert_eq!(grid.filled_count(), 1);
    assert_eq!(grid.get(19, 4), Some(PieceKind::O.id()));

    let after = grid.clone();
    assert_eq!(grid.clear_full_rows(), 0);
    assert_eq!(grid, after);
}

#[test]
fn test_clear_non_adjacent_rows_keeps_relative_order() {
    let mut grid = Grid::new();
    fill_row(&mut grid, 10, PieceKind::S);
    fill_row(&mut grid, 18, PieceKind::S);
    grid.set_cell(9, 0, PieceKind::L);
    grid.set_cell(12, 1, PieceKind::J);
    grid.set_cell(19, 2, PieceKind::Z);

    assert_eq!(grid.clear_full_rows(), 2);

    assert_eq!(grid.get(11, 0), Some(PieceKind::L.id()));
    assert_eq!(grid.get(13, 1), Some(PieceKind::J.id()));
    assert_eq!(grid.get(19, 2), Some(PieceKind::Z.id()));
    assert!(grid.row(0).unwrap().iter().all(|&c| c == EMPTY_CELL));
    assert!(grid.row(1).unwrap().iter().all(|&c| c == EMPTY_CELL));
    assert_eq!(grid.filled_count(), 3);
}

#[test]
fn test_clear_whole_grid() {
    let mut grid = Grid::new();
    for row in 0..GRID_ROWS as i8 {
        fill_row(&mut grid, row, PieceKind::T);
    }
    assert_eq!(grid.clear_full_rows(), GRID_ROWS as u32);
    assert_eq!(grid.filled_count(), 0);
}
