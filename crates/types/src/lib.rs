//! Shared types module - plain data structures and rule constants
//!
//! Everything in here is dependency-free so it can be used by the core state
//! machine, the terminal frontend and the score store alike.
//!
//! # Grid Dimensions
//!
//! - **Rows**: 20 (indexed 0-19, top to bottom)
//! - **Columns**: 10 (indexed 0-9, left to right)
//!
//! Coordinates are always `(row, column)`, matching [`Position`].
//!
//! # Rule Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LINE_SCORES` | 0/100/300/500/800 | Base points for 0-4 lines in one lock |
//! | `LEVEL_THRESHOLDS` | 0/10/20/30/40 | Cumulative lines for levels 1-5 |
//! | `SOFT_DROP_POINTS` | 1 | Bonus per row of manual descent |
//! | `HARD_DROP_POINTS` | 2 | Bonus per row of hard drop |
//! | `MIN_FALL_INTERVAL_MS` | 50 | Floor of the speed curve |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Difficulty, GameAction, PieceKind, Position, GRID_COLUMNS, GRID_ROWS};
//!
//! // Piece identifiers are the values written into grid cells.
//! assert_eq!(PieceKind::L.id(), 1);
//! assert_eq!(PieceKind::from_id(7), Some(PieceKind::Z));
//!
//! // Positions translate by value.
//! let p = Position::new(3, 4).translate(1, -1);
//! assert_eq!(p, Position::new(4, 3));
//!
//! // Difficulty presets carry their starting fall interval.
//! assert_eq!(Difficulty::from_str("hard"), Some(Difficulty::Hard));
//! assert_eq!(Difficulty::Hard.initial_fall_interval_ms(), 200);
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!((GRID_ROWS, GRID_COLUMNS), (20, 10));
//! ```

/// Number of playable rows.
pub const GRID_ROWS: u8 = 20;

/// Number of playable columns.
pub const GRID_COLUMNS: u8 = 10;

/// Fixed timestep of the terminal runner (16ms ≈ 60 FPS).
pub const TICK_MS: u32 = 16;

/// Base points for clearing N rows with a single lock, before the level multiplier.
///
/// Index 0 is unused (no rows, no points). Four rows is only reachable with the I piece.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Cumulative cleared-line thresholds; reaching `LEVEL_THRESHOLDS[i]` means level `i + 1`.
pub const LEVEL_THRESHOLDS: [u32; 5] = [0, 10, 20, 30, 40];

/// Bonus points per row for a manual (soft) drop.
pub const SOFT_DROP_POINTS: u32 = 1;

/// Bonus points per row for a hard drop.
pub const HARD_DROP_POINTS: u32 = 2;

/// Each level multiplies the fall interval by `SPEED_DECAY_NUMERATOR / SPEED_DECAY_DENOMINATOR`.
pub const SPEED_DECAY_NUMERATOR: u32 = 95;

/// See [`SPEED_DECAY_NUMERATOR`].
pub const SPEED_DECAY_DENOMINATOR: u32 = 100;

/// The fall interval never drops below this.
pub const MIN_FALL_INTERVAL_MS: u32 = 50;

/// Delay before a held movement key starts repeating.
pub const DEFAULT_REPEAT_DELAY_MS: u32 = 200;

/// Interval between repeats of a held movement key.
pub const DEFAULT_REPEAT_INTERVAL_MS: u32 = 100;

/// Held soft drop starts repeating sooner.
pub const SOFT_DROP_REPEAT_DELAY_MS: u32 = 100;

/// Held soft drop repeats twice as fast as sideways movement.
pub const SOFT_DROP_REPEAT_INTERVAL_MS: u32 = 50;

/// Maximum number of records kept by the score store.
pub const MAX_SCORE_RECORDS: usize = 10;

/// A grid cell: `0` is empty, `1..=7` is the id of the piece that filled it.
pub type Cell = u8;

/// The empty cell value.
pub const EMPTY_CELL: Cell = 0;

/// The seven piece kinds.
///
/// The numeric ids are part of the grid format: locked cells store the id of
/// the piece they came from, and the renderer picks a color from it.
/// - **L**: 1, orange
/// - **J**: 2, blue
/// - **I**: 3, cyan, the only 4-long piece
/// - **O**: 4, yellow, the 2x2 square
/// - **S**: 5, green
/// - **T**: 6, purple
/// - **Z**: 7, red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    L,
    J,
    I,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every piece kind, in id order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::L,
        PieceKind::J,
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Grid identifier of this piece (1..=7).
    pub fn id(&self) -> Cell {
        match self {
            PieceKind::L => 1,
            PieceKind::J => 2,
            PieceKind::I => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::id`]. Returns `None` for `0` and anything above 7.
    pub fn from_id(id: Cell) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from a single letter (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Upper-case letter, as shown in the side panel.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// A `(row, column)` grid coordinate.
///
/// Rows grow downwards. Values may be negative or past the grid edge while a
/// piece is being tested at a tentative position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: i8,
    pub column: i8,
}

impl Position {
    pub const fn new(row: i8, column: i8) -> Self {
        Self { row, column }
    }

    /// A new position moved by `(d_row, d_column)`.
    pub const fn translate(self, d_row: i8, d_column: i8) -> Self {
        Self {
            row: self.row + d_row,
            column: self.column + d_column,
        }
    }

    /// Component-wise sum, used to turn a relative offset into an absolute cell.
    pub const fn offset_by(self, offset: Position) -> Self {
        self.translate(offset.row, offset.column)
    }
}

/// Difficulty preset chosen at session start.
///
/// The only thing a difficulty changes is the starting fall interval; the
/// label is also stored with the score record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse from a label (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Display label, also written into score records.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Fall interval at level 1.
    pub fn initial_fall_interval_ms(&self) -> u32 {
        match self {
            Difficulty::Easy => 800,
            Difficulty::Medium => 400,
            Difficulty::Hard => 200,
        }
    }
}

/// Discrete input events understood by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down; locks it if it cannot descend
    MoveDown,
    /// Rotate piece 90° clockwise with horizontal wall kicks
    Rotate,
    /// Drop the piece until it locks
    HardDrop,
    Pause,
    Resume,
    /// Start a fresh session (the only action accepted after game over)
    Reset,
}

impl GameAction {
    /// Parse action from a camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "pause" => Some(GameAction::Pause),
            "resume" => Some(GameAction::Resume),
            "reset" => Some(GameAction::Reset),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Pause => "pause",
            GameAction::Resume => "resume",
            GameAction::Reset => "reset",
        }
    }
}

/// Lifecycle of a session.
///
/// `GameOver` is terminal until an explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    Active,
    Paused,
    GameOver,
}

/// Emitted after every lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    pub lines_cleared: u32,
    /// Points awarded for the clear (already multiplied by level).
    pub line_clear_score: u32,
    /// The next piece could not spawn.
    pub game_over: bool,
}

/// Final tallies of a finished session, handed to the score store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub difficulty: Difficulty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_ids_roundtrip_and_are_unique() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.id() as usize, i + 1);
            assert_eq!(PieceKind::from_id(kind.id()), Some(*kind));
        }
        assert_eq!(PieceKind::from_id(0), None);
        assert_eq!(PieceKind::from_id(8), None);
    }

    #[test]
    fn position_translate_does_not_mutate() {
        let p = Position::new(0, 3);
        let q = p.translate(-1, 2);
        assert_eq!(p, Position::new(0, 3));
        assert_eq!(q, Position::new(-1, 5));
        assert_eq!(p.offset_by(Position::new(2, 2)), Position::new(2, 5));
    }

    #[test]
    fn difficulty_presets() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
        assert_eq!(Difficulty::Easy.initial_fall_interval_ms(), 800);
        assert_eq!(Difficulty::Medium.initial_fall_interval_ms(), 400);
        assert_eq!(Difficulty::Hard.initial_fall_interval_ms(), 200);
        assert_eq!(Difficulty::from_str(" Medium "), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("insane"), None);
    }

    #[test]
    fn action_names_roundtrip() {
        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::MoveDown,
            GameAction::Rotate,
            GameAction::HardDrop,
            GameAction::Pause,
            GameAction::Resume,
            GameAction::Reset,
        ] {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }

    #[test]
    fn rule_tables() {
        assert_eq!(LINE_SCORES[1..], [100, 300, 500, 800]);
        assert_eq!(LEVEL_THRESHOLDS, [0, 10, 20, 30, 40]);
        assert!(MIN_FALL_INTERVAL_MS > 0);
    }
}
