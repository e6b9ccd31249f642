//! Shapes module - piece rotation tables and the falling shape
//!
//! Every piece kind owns an immutable table of rotation states. Each state is
//! exactly four `(row, column)` offsets relative to the shape's translation
//! offset; state `i + 1` is state `i` turned 90° clockwise. The O piece has a
//! single state, so rotating it cycles modulo 1 and never changes its cells.
//!
//! A [`Shape`] only stores its kind, a rotation index and a translation
//! offset. Absolute cells are recomputed on demand from the table.

use crate::types::{PieceKind, Position};

/// Four cells of one rotation state.
pub type ShapeCells = [Position; 4];

const fn p(row: i8, column: i8) -> Position {
    Position::new(row, column)
}

const L_STATES: [ShapeCells; 4] = [
    [p(0, 2), p(1, 0), p(1, 1), p(1, 2)],
    [p(0, 1), p(1, 1), p(2, 1), p(2, 2)],
    [p(1, 0), p(1, 1), p(1, 2), p(2, 0)],
    [p(0, 0), p(0, 1), p(1, 1), p(2, 1)],
];

const J_STATES: [ShapeCells; 4] = [
    [p(0, 0), p(1, 0), p(1, 1), p(1, 2)],
    [p(0, 1), p(0, 2), p(1, 1), p(2, 1)],
    [p(1, 0), p(1, 1), p(1, 2), p(2, 2)],
    [p(0, 1), p(1, 1), p(2, 0), p(2, 1)],
];

const I_STATES: [ShapeCells; 4] = [
    [p(1, 0), p(1, 1), p(1, 2), p(1, 3)],
    [p(0, 2), p(1, 2), p(2, 2), p(3, 2)],
    [p(2, 0), p(2, 1), p(2, 2), p(2, 3)],
    [p(0, 1), p(1, 1), p(2, 1), p(3, 1)],
];

const O_STATES: [ShapeCells; 1] = [[p(0, 0), p(0, 1), p(1, 0), p(1, 1)]];

const S_STATES: [ShapeCells; 4] = [
    [p(0, 1), p(0, 2), p(1, 0), p(1, 1)],
    [p(0, 1), p(1, 1), p(1, 2), p(2, 2)],
    [p(1, 1), p(1, 2), p(2, 0), p(2, 1)],
    [p(0, 0), p(1, 0), p(1, 1), p(2, 1)],
];

const T_STATES: [ShapeCells; 4] = [
    [p(0, 1), p(1, 0), p(1, 1), p(1, 2)],
    [p(0, 1), p(1, 1), p(1, 2), p(2, 1)],
    [p(1, 0), p(1, 1), p(1, 2), p(2, 1)],
    [p(0, 1), p(1, 0), p(1, 1), p(2, 1)],
];

const Z_STATES: [ShapeCells; 4] = [
    [p(0, 0), p(0, 1), p(1, 1), p(1, 2)],
    [p(0, 2), p(1, 1), p(1, 2), p(2, 1)],
    [p(1, 0), p(1, 1), p(2, 1), p(2, 2)],
    [p(0, 1), p(1, 0), p(1, 1), p(2, 0)],
];

/// Rotation table of a piece kind (4 states, or 1 for O).
pub fn rotation_states(kind: PieceKind) -> &'static [ShapeCells] {
    match kind {
        PieceKind::L => &L_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::I => &I_STATES,
        PieceKind::O => &O_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::T => &T_STATES,
        PieceKind::Z => &Z_STATES,
    }
}

/// Number of distinct rotation states; rotation cycles modulo this.
pub fn rotation_state_count(kind: PieceKind) -> u8 {
    rotation_states(kind).len() as u8
}

/// Relative offsets of one rotation state. `state` wraps modulo the state count.
pub fn relative_offsets(kind: PieceKind, state: u8) -> ShapeCells {
    let states = rotation_states(kind);
    states[state as usize % states.len()]
}

/// Translation applied when a piece spawns.
///
/// Horizontally centers the piece; the I piece starts one row higher so its
/// horizontal bar (row 1 of its table) lands on grid row 0.
pub fn spawn_offset(kind: PieceKind) -> Position {
    match kind {
        PieceKind::I => p(-1, 3),
        PieceKind::O => p(0, 4),
        _ => p(0, 3),
    }
}

/// Rotation index and translation, enough to restore a shape exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapePose {
    pub rotation: u8,
    pub offset: Position,
}

/// A piece in play (or waiting as the next piece).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    kind: PieceKind,
    rotation: u8,
    offset: Position,
}

impl Shape {
    /// Create a shape in its spawn orientation at its spawn offset
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            offset: spawn_offset(kind),
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Grid id written into cells when this shape locks.
    pub fn id(&self) -> u8 {
        self.kind.id()
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    pub fn offset(&self) -> Position {
        self.offset
    }

    pub fn state_count(&self) -> u8 {
        rotation_state_count(self.kind)
    }

    pub fn pose(&self) -> ShapePose {
        ShapePose {
            rotation: self.rotation,
            offset: self.offset,
        }
    }

    /// Restore a pose previously taken with [`Shape::pose`].
    pub fn set_pose(&mut self, pose: ShapePose) {
        self.rotation = pose.rotation % self.state_count();
        self.offset = pose.offset;
    }

    /// Offsets of the current rotation state, relative to the translation offset.
    pub fn relative_cells(&self) -> ShapeCells {
        relative_offsets(self.kind, self.rotation)
    }

    /// Absolute grid cells: current state's offsets plus the translation.
    pub fn cell_positions(&self) -> ShapeCells {
        self.relative_cells().map(|cell| cell.offset_by(self.offset))
    }

    /// Translate unconditionally. Callers validate and roll back.
    pub fn move_by(&mut self, d_row: i8, d_column: i8) {
        self.offset = self.offset.translate(d_row, d_column);
    }

    /// Advance to the next rotation state (clockwise). Does not validate.
    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + 1) % self.state_count();
    }

    /// Exact inverse of [`Shape::rotate`].
    pub fn undo_rotation(&mut self) {
        let count = self.state_count();
        self.rotation = (self.rotation + count - 1) % count;
    }

    /// Columns spanned by the rotation table's offset grid.
    pub fn width(&self) -> u8 {
        table_extent(self.kind, |cell| cell.column)
    }

    /// Rows spanned by the rotation table's offset grid.
    pub fn height(&self) -> u8 {
        table_extent(self.kind, |cell| cell.row)
    }
}

fn table_extent(kind: PieceKind, axis: impl Fn(&Position) -> i8) -> u8 {
    let max = rotation_states(kind)
        .iter()
        .flatten()
        .map(|cell| axis(cell))
        .max()
        .unwrap_or(0);
    (max + 1) as u8
}
