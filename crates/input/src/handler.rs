//! Key-repeat handler for terminal environments.
//!
//! Holding a movement key fires the action once on press, again after the
//! repeat delay, then once per repeat interval. Soft drop uses its own
//! (faster) timings.
//!
//! Many terminals never report key releases, so a key counts as released once
//! no press for it has arrived within the release timeout.

use std::time::Instant;

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::map::action_for_code;
use crate::types::{
    GameAction, DEFAULT_REPEAT_DELAY_MS, DEFAULT_REPEAT_INTERVAL_MS, SOFT_DROP_REPEAT_DELAY_MS,
    SOFT_DROP_REPEAT_INTERVAL_MS,
};

/// Upper bound on actions produced by one `update`.
pub const MAX_ACTIONS_PER_UPDATE: usize = 32;

// Terminal auto-repeat usually re-sends a held key every ~30-50ms, well below this.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 250;

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

impl HorizontalDirection {
    fn action(self) -> Option<GameAction> {
        match self {
            HorizontalDirection::Left => Some(GameAction::MoveLeft),
            HorizontalDirection::Right => Some(GameAction::MoveRight),
            HorizontalDirection::None => None,
        }
    }
}

/// Hold timer for one key group.
#[derive(Debug, Clone, Copy)]
struct RepeatTimer {
    delay_ms: u32,
    interval_ms: u32,
    held_ms: u32,
    /// Hold time at which the next repeat fires.
    next_fire_ms: u32,
}

impl RepeatTimer {
    fn new(delay_ms: u32, interval_ms: u32) -> Self {
        Self {
            delay_ms,
            interval_ms: interval_ms.max(1),
            held_ms: 0,
            next_fire_ms: delay_ms,
        }
    }

    fn restart(&mut self) {
        self.held_ms = 0;
        self.next_fire_ms = self.delay_ms;
    }

    /// Advance the hold time and return how many repeats came due.
    fn advance(&mut self, elapsed_ms: u32) -> u32 {
        self.held_ms = self.held_ms.saturating_add(elapsed_ms);
        let mut fired = 0;
        while self.held_ms >= self.next_fire_ms {
            fired += 1;
            self.next_fire_ms = self.next_fire_ms.saturating_add(self.interval_ms);
        }
        fired
    }
}

/// Tracks held movement keys and turns hold time into repeated actions.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    horizontal_timer: RepeatTimer,
    down_timer: RepeatTimer,
    last_key_time: Instant,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_REPEAT_DELAY_MS, DEFAULT_REPEAT_INTERVAL_MS)
    }

    /// Horizontal repeat timings; soft drop keeps its own defaults.
    pub fn with_config(delay_ms: u32, interval_ms: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            horizontal_timer: RepeatTimer::new(delay_ms, interval_ms),
            down_timer: RepeatTimer::new(SOFT_DROP_REPEAT_DELAY_MS, SOFT_DROP_REPEAT_INTERVAL_MS),
            last_key_time: Instant::now(),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    pub fn down_held(&self) -> bool {
        self.down_held
    }

    /// Register a key press.
    ///
    /// Returns the action to apply now: the first press of a movement key,
    /// or any non-repeating action. Re-presses of a held movement key
    /// (terminal auto-repeat) only keep the hold alive.
    /// Press from a full key event. Control chords are ignored.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<GameAction> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }
        self.handle_key_press(key.code)
    }

    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        let action = action_for_code(code)?;
        let direction = match action {
            GameAction::MoveLeft => HorizontalDirection::Left,
            GameAction::MoveRight => HorizontalDirection::Right,
            GameAction::MoveDown => {
                self.last_key_time = Instant::now();
                if self.down_held {
                    return None;
                }
                self.down_held = true;
                self.down_timer.restart();
                return Some(action);
            }
            _ => return Some(action),
        };

        self.last_key_time = Instant::now();
        if self.horizontal == direction {
            return None;
        }
        self.horizontal = direction;
        self.horizontal_timer.restart();
        Some(action)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match action_for_code(code) {
            Some(GameAction::MoveLeft) if self.horizontal == HorizontalDirection::Left => {
                self.release_horizontal();
            }
            Some(GameAction::MoveRight) if self.horizontal == HorizontalDirection::Right => {
                self.release_horizontal();
            }
            Some(GameAction::MoveDown) => self.release_down(),
            _ => {}
        }
    }

    fn release_horizontal(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.horizontal_timer.restart();
    }

    fn release_down(&mut self) {
        self.down_held = false;
        self.down_timer.restart();
    }

    /// Advance hold timers by `elapsed_ms` and collect due repeats.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, MAX_ACTIONS_PER_UPDATE> {
        let mut actions = ArrayVec::new();

        let since_last_key = self.last_key_time.elapsed().as_millis();
        if since_last_key > self.key_release_timeout_ms as u128 {
            self.release_horizontal();
            self.release_down();
        }

        if let Some(action) = self.horizontal.action() {
            for _ in 0..self.horizontal_timer.advance(elapsed_ms) {
                let _ = actions.try_push(action);
            }
        }

        if self.down_held {
            for _ in 0..self.down_timer.advance(elapsed_ms) {
                let _ = actions.try_push(GameAction::MoveDown);
            }
        }

        actions
    }

    /// Forget every held key.
    pub fn reset(&mut self) {
        self.release_horizontal();
        self.release_down();
        self.last_key_time = Instant::now();
    }

    #[cfg(test)]
    fn age_last_key(&mut self, by: std::time::Duration) {
        self.last_key_time = Instant::now() - by;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
