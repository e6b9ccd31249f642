//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates as `blockfall::{core,input,scores,term,types}`
//! and holds the runner's command-line configuration.

pub mod config;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_scores as scores;
pub use blockfall_term as term;
pub use blockfall_types as types;
