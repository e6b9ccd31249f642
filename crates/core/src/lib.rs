//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules and session state. It has no
//! dependency on the terminal, the filesystem or the clock: time enters only
//! through [`GameState::tick`](game_state::GameState::tick), randomness only
//! through the session seed.
//!
//! # Module Structure
//!
//! - [`grid`]: 20x10 cell matrix with bounds checks and line clearing
//! - [`shapes`]: rotation tables, spawn offsets and the falling [`Shape`]
//! - [`bag`]: seeded bag randomizer dealing every kind once per cycle
//! - [`scoring`]: line-clear points, level table and fall-speed curve
//! - [`game_state`]: the session state machine
//! - [`snapshot`]: read-only copy of a session for renderers
//!
//! # Rules
//!
//! - Rotation is clockwise through a fixed table; a blocked rotation tries
//!   horizontal kicks of 0, -1, +1, -2, +2 columns and otherwise leaves the
//!   shape untouched.
//! - Clearing 1-4 rows scores 100/300/500/800 times the level.
//! - Soft drop earns 1 point per row, hard drop 2.
//! - Levels come from cumulative lines (0, 10, 20, 30, 40) and cap at 5.
//! - The game ends when a freshly spawned shape overlaps the stack.
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameState, SessionConfig};
//! use blockfall_core::types::{Difficulty, GameAction};
//!
//! let mut game = GameState::new(SessionConfig::new(12345, Difficulty::Medium));
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```

pub mod bag;
pub mod game_state;
pub mod grid;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

pub use bag::{BlockBag, SimpleRng};
pub use game_state::{GameState, SessionConfig, WALL_KICKS};
pub use grid::Grid;
pub use scoring::{drop_points, fall_interval_ms, level_for_lines, line_clear_points};
pub use shapes::{Shape, ShapePose};
pub use snapshot::{GameSnapshot, PieceSnapshot, PreviewSnapshot};
