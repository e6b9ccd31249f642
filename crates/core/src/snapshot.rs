use crate::shapes::{Shape, ShapeCells};
use crate::types::{Cell, Difficulty, GamePhase, PieceKind, Position, GRID_COLUMNS, GRID_ROWS};

/// The falling shape, with absolute grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub cells: ShapeCells,
}

impl From<&Shape> for PieceSnapshot {
    fn from(value: &Shape) -> Self {
        Self {
            kind: value.kind(),
            rotation: value.rotation(),
            cells: value.cell_positions(),
        }
    }
}

/// The next shape in its spawn orientation, relative to its own offset grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewSnapshot {
    pub kind: PieceKind,
    pub cells: ShapeCells,
    pub width: u8,
    pub height: u8,
}

impl From<&Shape> for PreviewSnapshot {
    fn from(value: &Shape) -> Self {
        Self {
            kind: value.kind(),
            cells: value.relative_cells(),
            width: value.width(),
            height: value.height(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub grid: [[Cell; GRID_COLUMNS as usize]; GRID_ROWS as usize],
    pub current: PieceSnapshot,
    pub next: PreviewSnapshot,
    pub phase: GamePhase,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub fall_interval_ms: u32,
    pub difficulty: Difficulty,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.phase == GamePhase::Active
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let empty_cells = [Position::default(); 4];
        Self {
            grid: [[0; GRID_COLUMNS as usize]; GRID_ROWS as usize],
            current: PieceSnapshot {
                kind: PieceKind::I,
                rotation: 0,
                cells: empty_cells,
            },
            next: PreviewSnapshot {
                kind: PieceKind::I,
                cells: empty_cells,
                width: 0,
                height: 0,
            },
            phase: GamePhase::Active,
            score: 0,
            level: 1,
            lines: 0,
            fall_interval_ms: 0,
            difficulty: Difficulty::default(),
        }
    }
}
