//! Runner configuration: command-line flags with environment fallbacks.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use crate::core::SessionConfig;
use crate::scores::{DEFAULT_PLAYER, DEFAULT_SCORES_FILE};
use crate::types::{Difficulty, MIN_FALL_INTERVAL_MS};

/// Falling-block puzzle game for the terminal.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Starting speed preset: easy, medium or hard.
    #[arg(short, long, env = "BLOCKFALL_DIFFICULTY", default_value = "medium", value_parser = parse_difficulty)]
    pub difficulty: Difficulty,

    /// Name written into the score record.
    #[arg(short, long, env = "BLOCKFALL_PLAYER", default_value = DEFAULT_PLAYER)]
    pub player: String,

    /// Level-1 fall interval in milliseconds (overrides the difficulty preset).
    #[arg(long, env = "BLOCKFALL_FALL_INTERVAL_MS")]
    pub fall_interval_ms: Option<u32>,

    /// Piece randomizer seed (defaults to the wall clock).
    #[arg(long, env = "BLOCKFALL_SEED")]
    pub seed: Option<u32>,

    /// Where the ranked score list is kept.
    #[arg(long, env = "BLOCKFALL_SCORES_FILE", default_value = DEFAULT_SCORES_FILE)]
    pub scores_file: PathBuf,

    /// Print the ranked score list and exit.
    #[arg(long)]
    pub show_scores: bool,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(s).ok_or_else(|| format!("unknown difficulty '{}' (easy|medium|hard)", s))
}

impl Cli {
    /// Player name, `Guest` when blank.
    pub fn player_name(&self) -> &str {
        let name = self.player.trim();
        if name.is_empty() {
            DEFAULT_PLAYER
        } else {
            name
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }

    /// Values the core consumes at session start.
    pub fn session_config(&self) -> SessionConfig {
        let mut config = SessionConfig::new(self.seed(), self.difficulty);
        if let Some(interval) = self.fall_interval_ms {
            if interval < MIN_FALL_INTERVAL_MS {
                eprintln!(
                    "[Config] fall interval {}ms is below the {}ms floor; using the floor",
                    interval, MIN_FALL_INTERVAL_MS
                );
            }
            config = config.with_fall_interval_ms(interval.max(MIN_FALL_INTERVAL_MS));
        }
        config
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
        .unwrap_or(1)
}
