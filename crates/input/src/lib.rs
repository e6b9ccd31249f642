//! Terminal input.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and provides
//! a key-repeat handler that works in terminals without key-release events.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::{HorizontalDirection, InputHandler};
pub use map::{action_for_code, handle_key_event, is_repeatable, should_quit};
