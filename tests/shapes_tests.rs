//! Shape tests - rotation tables and spawn placement

use blockfall::core::shapes::{relative_offsets, rotation_state_count, spawn_offset};
use blockfall::core::{Grid, Shape};
use blockfall::types::{PieceKind, Position};

#[test]
fn test_every_state_has_four_distinct_cells() {
    for kind in PieceKind::ALL {
        for state in 0..rotation_state_count(kind) {
            let cells = relative_offsets(kind, state);
            for i in 0..4 {
                for j in i + 1..4 {
                    assert_ne!(cells[i], cells[j], "{:?} state {}", kind, state);
                }
            }
        }
    }
}

#[test]
fn test_spawn_cells_inside_empty_grid() {
    let grid = Grid::new();
    for kind in PieceKind::ALL {
        let shape = Shape::new(kind);
        for cell in shape.cell_positions() {
            assert!(grid.is_empty(cell.row, cell.column), "{:?} at {:?}", kind, cell);
        }
    }
}

#[test]
fn test_spawn_offsets_center_pieces() {
    assert_eq!(spawn_offset(PieceKind::I), Position::new(-1, 3));
    assert_eq!(spawn_offset(PieceKind::O), Position::new(0, 4));
    for kind in [PieceKind::L, PieceKind::J, PieceKind::S, PieceKind::T, PieceKind::Z] {
        assert_eq!(spawn_offset(kind), Position::new(0, 3));
    }
}

#[test]
fn test_full_turn_returns_to_start() {
    for kind in PieceKind::ALL {
        let start = Shape::new(kind);
        let mut shape = start;
        for _ in 0..4 {
            shape.rotate();
        }
        assert_eq!(shape, start, "{:?}", kind);
    }
}

#[test]
fn test_move_by_translates_every_cell() {
    let mut shape = Shape::new(PieceKind::L);
    let before = shape.cell_positions();
    shape.move_by(2, -1);
    let after = shape.cell_positions();
    for (a, b) in before.iter().zip(after.iter()) {
        assert_eq!(b.row, a.row + 2);
        assert_eq!(b.column, a.column - 1);
    }
}

#[test]
fn test_piece_ids() {
    let ids: Vec<u8> = PieceKind::ALL.iter().map(|k| Shape::new(*k).id()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
}
