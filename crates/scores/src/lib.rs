//! Ranked high-score list persisted as a JSON array
//!
//! Records are kept sorted by score (highest first); equal scores put the
//! newer timestamp first. Only the best [`MAX_SCORE_RECORDS`] survive.
//!
//! A missing or unreadable file is never fatal: [`HighScores::load`] logs a
//! warning and starts from an empty list.

use std::cmp::{Ordering, Reverse};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use blockfall_types::{Difficulty, GameResult, MAX_SCORE_RECORDS};

/// Default file name, relative to the working directory.
pub const DEFAULT_SCORES_FILE: &str = "high_scores.json";

/// Name recorded when the player gave none.
pub const DEFAULT_PLAYER: &str = "Guest";

/// One finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(default)]
    pub player: String,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub lines: u32,
    /// ISO-8601 (RFC 3339) time the game ended.
    #[serde(default)]
    pub timestamp: String,
}

impl ScoreRecord {
    /// Stamp a finished game with the player name and the current UTC time.
    pub fn from_result(player: &str, result: &GameResult) -> Self {
        Self::from_result_at(player, result, Utc::now())
    }

    pub fn from_result_at(player: &str, result: &GameResult, at: DateTime<Utc>) -> Self {
        let player = player.trim();
        Self {
            player: if player.is_empty() {
                DEFAULT_PLAYER.to_string()
            } else {
                player.to_string()
            },
            score: result.score,
            difficulty: result.difficulty.label().to_string(),
            level: result.level,
            lines: result.lines,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Parsed difficulty label, if it is one we know.
    pub fn difficulty(&self) -> Option<Difficulty> {
        Difficulty::from_str(&self.difficulty)
    }

    /// RFC 3339, or a zone-less `YYYY-MM-DDTHH:MM:SS[.f]` read as UTC.
    fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        if let Ok(t) = DateTime::parse_from_rfc3339(&self.timestamp) {
            return Some(t.with_timezone(&Utc));
        }
        self.timestamp
            .parse::<NaiveDateTime>()
            .ok()
            .map(|t| t.and_utc())
    }
}

/// Sort key: score descending, then newer timestamp first.
///
/// Timestamps that do not parse rank as the oldest; the raw string breaks
/// any remaining tie.
pub type RankKey = (Reverse<u32>, Reverse<Option<DateTime<Utc>>>, Reverse<String>);

pub fn rank_key(record: &ScoreRecord) -> RankKey {
    (
        Reverse(record.score),
        Reverse(record.parsed_timestamp()),
        Reverse(record.timestamp.clone()),
    )
}

pub fn rank_order(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
    rank_key(a).cmp(&rank_key(b))
}

/// Sort and truncate in place.
pub fn rank_records(records: &mut Vec<ScoreRecord>) {
    records.sort_by_cached_key(rank_key);
    records.truncate(MAX_SCORE_RECORDS);
}

/// The ranked list plus the file it lives in.
#[derive(Debug, Clone)]
pub struct HighScores {
    path: PathBuf,
    records: Vec<ScoreRecord>,
}

impl HighScores {
    /// Empty list bound to `path`; nothing is read.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
        }
    }

    /// Load the list from `path`, recovering from a missing or corrupt file.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if !path.exists() {
            return Self::empty(path);
        }
        match read_records(&path) {
            Ok(mut records) => {
                rank_records(&mut records);
                Self { path, records }
            }
            Err(e) => {
                eprintln!("[Scores] ignoring unreadable score file: {:#}", e);
                Self::empty(path)
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records, best first.
    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn best(&self) -> Option<&ScoreRecord> {
        self.records.first()
    }

    /// Would a game with this score make the list?
    pub fn qualifies(&self, score: u32) -> bool {
        self.records.len() < MAX_SCORE_RECORDS
            || self.records.last().map_or(true, |last| score > last.score)
    }

    /// Add a record and re-rank.
    ///
    /// Returns the record's 1-based rank, or `None` if it fell off the list.
    pub fn insert(&mut self, record: ScoreRecord) -> Option<usize> {
        let key = rank_key(&record);
        let idx = self.records.partition_point(|r| rank_key(r) <= key);
        if idx >= MAX_SCORE_RECORDS {
            return None;
        }
        self.records.insert(idx, record);
        self.records.truncate(MAX_SCORE_RECORDS);
        Some(idx + 1)
    }

    /// Write the list as pretty JSON, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create score directory {}", parent.display()))?;
        }
        let json =
            serde_json::to_string_pretty(&self.records).context("serialize score records")?;
        fs::write(&self.path, json)
            .with_context(|| format!("write score file {}", self.path.display()))?;
        Ok(())
    }

    /// Insert then save. Returns the rank as [`HighScores::insert`] does.
    pub fn submit(&mut self, record: ScoreRecord) -> Result<Option<usize>> {
        let rank = self.insert(record);
        self.save()?;
        Ok(rank)
    }

    /// Forget every record. Call [`HighScores::save`] to persist.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

fn read_records(path: &Path) -> Result<Vec<ScoreRecord>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read score file {}", path.display()))?;
    let records = serde_json::from_str(&text)
        .with_context(|| format!("parse score file {}", path.display()))?;
    Ok(records)
}
