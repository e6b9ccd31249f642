//! Scoring module - line-clear points, level table and the fall-speed curve
//!
//! Rules:
//! - Clearing N rows in one lock awards `LINE_SCORES[N] * level`.
//! - Drop bonuses are added unmultiplied.
//! - Level is looked up from cumulative lines against `LEVEL_THRESHOLDS`.
//! - Each level above 1 makes gravity 5% faster, never below the floor.

use crate::types::{
    HARD_DROP_POINTS, LEVEL_THRESHOLDS, LINE_SCORES, MIN_FALL_INTERVAL_MS, SOFT_DROP_POINTS,
    SPEED_DECAY_DENOMINATOR, SPEED_DECAY_NUMERATOR,
};

/// Points for clearing `lines` rows in a single lock at `level` (1-based).
///
/// Anything outside 1..=4 rows scores nothing.
pub fn line_clear_points(lines: u32, level: u32) -> u32 {
    match LINE_SCORES.get(lines as usize) {
        Some(&base) => base.saturating_mul(level),
        None => 0,
    }
}

/// Bonus for a manual descent of `rows` rows.
pub fn drop_points(rows: u32, hard_drop: bool) -> u32 {
    let per_row = if hard_drop {
        HARD_DROP_POINTS
    } else {
        SOFT_DROP_POINTS
    };
    rows.saturating_mul(per_row)
}

/// Level for a cumulative line count: the highest table entry reached, 1-based.
pub fn level_for_lines(total_lines: u32) -> u32 {
    LEVEL_THRESHOLDS
        .iter()
        .take_while(|&&threshold| total_lines >= threshold)
        .count()
        .max(1) as u32
}

/// Fall interval for a level, starting from the session's base interval.
///
/// `base * 0.95^(level - 1)` in integer arithmetic, floored at
/// `MIN_FALL_INTERVAL_MS`. A base below the floor is raised to it.
pub fn fall_interval_ms(base_ms: u32, level: u32) -> u32 {
    let mut interval = base_ms;
    for _ in 1..level {
        if interval <= MIN_FALL_INTERVAL_MS {
            break;
        }
        interval = (interval as u64 * SPEED_DECAY_NUMERATOR as u64 / SPEED_DECAY_DENOMINATOR as u64)
            as u32;
    }
    interval.max(MIN_FALL_INTERVAL_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_points() {
        assert_eq!(line_clear_points(0, 1), 0);
        assert_eq!(line_clear_points(1, 1), 100);
        assert_eq!(line_clear_points(2, 1), 300);
        assert_eq!(line_clear_points(3, 1), 500);
        assert_eq!(line_clear_points(4, 1), 800);
        assert_eq!(line_clear_points(1, 3), 300);
        assert_eq!(line_clear_points(4, 5), 4000);
        assert_eq!(line_clear_points(5, 1), 0);
    }

    #[test]
    fn test_drop_points() {
        assert_eq!(drop_points(1, false), 1);
        assert_eq!(drop_points(10, false), 10);
        assert_eq!(drop_points(10, true), 20);
        assert_eq!(drop_points(0, true), 0);
    }

    #[test]
    fn test_level_for_lines() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(29), 3);
        assert_eq!(level_for_lines(30), 4);
        assert_eq!(level_for_lines(40), 5);
        assert_eq!(level_for_lines(400), 5);
    }

    #[test]
    fn test_fall_interval_curve() {
        assert_eq!(fall_interval_ms(400, 1), 400);
        assert_eq!(fall_interval_ms(400, 2), 380);
        assert_eq!(fall_interval_ms(400, 3), 361);
        assert_eq!(fall_interval_ms(800, 5), 650);
    }

    #[test]
    fn test_fall_interval_floor() {
        assert_eq!(fall_interval_ms(52, 10), MIN_FALL_INTERVAL_MS);
        assert_eq!(fall_interval_ms(10, 1), MIN_FALL_INTERVAL_MS);
        assert_eq!(fall_interval_ms(200, 1000), MIN_FALL_INTERVAL_MS);
    }

    #[test]
    fn test_fall_interval_never_increases_with_level() {
        for base in [50, 200, 400, 800] {
            let mut prev = fall_interval_ms(base, 1);
            for level in 2..60 {
                let next = fall_interval_ms(base, level);
                assert!(next <= prev);
                assert!(next >= MIN_FALL_INTERVAL_MS);
                prev = next;
            }
        }
    }
}
