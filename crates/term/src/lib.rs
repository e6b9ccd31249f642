//! Terminal rendering.
//!
//! A small, game-oriented rendering layer: a pure [`GameView`] draws a
//! snapshot into a framebuffer, and [`TerminalRenderer`] flushes that
//! framebuffer to the terminal, emitting only what changed between frames.
//! Each grid cell is two terminal columns wide to keep the aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, AnchorY, FrameRect, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
