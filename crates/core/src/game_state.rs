//! Game state module - the session state machine
//!
//! Ties the grid, the bag and the scoring rules together. The state machine
//! owns the grid exclusively and drives the current shape's offset and
//! rotation. Every public operation is synchronous and leaves the state
//! consistent: a rejected move or rotation is fully rolled back before the
//! call returns.

use crate::bag::BlockBag;
use crate::grid::Grid;
use crate::scoring::{drop_points, fall_interval_ms, level_for_lines, line_clear_points};
use crate::shapes::Shape;
use crate::snapshot::{GameSnapshot, PieceSnapshot, PreviewSnapshot};
use crate::types::{Difficulty, GameAction, GamePhase, GameResult, LockEvent};

/// Horizontal offsets tried after a rotation collides: no kick, then one
/// column left/right, then two.
pub const WALL_KICKS: [i8; 5] = [0, -1, 1, -2, 2];

/// Values supplied by the caller at session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub seed: u32,
    pub difficulty: Difficulty,
    /// Fall interval at level 1.
    pub initial_fall_interval_ms: u32,
}

impl SessionConfig {
    /// Config using the difficulty's preset fall interval
    pub fn new(seed: u32, difficulty: Difficulty) -> Self {
        Self {
            seed,
            difficulty,
            initial_fall_interval_ms: difficulty.initial_fall_interval_ms(),
        }
    }

    pub fn with_fall_interval_ms(mut self, interval_ms: u32) -> Self {
        self.initial_fall_interval_ms = interval_ms;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(1, Difficulty::default())
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    bag: BlockBag,
    current: Shape,
    next: Shape,
    phase: GamePhase,
    score: u32,
    level: u32,
    lines: u32,
    difficulty: Difficulty,
    base_fall_interval_ms: u32,
    fall_interval_ms: u32,
    gravity_timer_ms: u32,
    /// Last lock (consumed by the caller).
    last_event: Option<LockEvent>,
    /// Set once on the transition to game over (consumed by the caller).
    game_result: Option<GameResult>,
}

impl GameState {
    /// Start a new session: empty grid, full bag, current and next drawn.
    pub fn new(config: SessionConfig) -> Self {
        let mut bag = BlockBag::new(config.seed);
        let current = Shape::new(bag.draw());
        let next = Shape::new(bag.draw());

        Self {
            grid: Grid::new(),
            bag,
            current,
            next,
            phase: GamePhase::Active,
            score: 0,
            level: 1,
            lines: 0,
            difficulty: config.difficulty,
            base_fall_interval_ms: config.initial_fall_interval_ms,
            fall_interval_ms: fall_interval_ms(config.initial_fall_interval_ms, 1),
            gravity_timer_ms: 0,
            last_event: None,
            game_result: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current(&self) -> &Shape {
        &self.current
    }

    pub fn next(&self) -> &Shape {
        &self.next
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Current gravity interval in milliseconds.
    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    pub fn bag(&self) -> &BlockBag {
        &self.bag
    }

    #[inline]
    fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    /// All four cells of the current shape lie inside the grid.
    pub fn block_inside(&self) -> bool {
        self.current
            .cell_positions()
            .iter()
            .all(|cell| self.grid.is_inside(cell.row, cell.column))
    }

    /// All four cells of the current shape are unoccupied.
    pub fn block_fits(&self) -> bool {
        self.current
            .cell_positions()
            .iter()
            .all(|cell| self.grid.is_empty(cell.row, cell.column))
    }

    /// Inside is checked first so occupancy is never asked of an off-grid cell.
    fn placement_valid(&self) -> bool {
        self.block_inside() && self.block_fits()
    }

    /// Translate the current shape, rolling back fully if the result is invalid.
    fn try_shift(&mut self, d_row: i8, d_column: i8) -> bool {
        self.current.move_by(d_row, d_column);
        if self.placement_valid() {
            return true;
        }
        self.current.move_by(-d_row, -d_column);
        false
    }

    /// Move one column left. Returns whether the shape moved.
    pub fn move_left(&mut self) -> bool {
        self.is_active() && self.try_shift(0, -1)
    }

    /// Move one column right. Returns whether the shape moved.
    pub fn move_right(&mut self) -> bool {
        self.is_active() && self.try_shift(0, 1)
    }

    /// Move one row down; if that is blocked the shape locks instead.
    ///
    /// Returns true if the shape descended, false if it locked (or the
    /// session is not active).
    pub fn move_down(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        if self.try_shift(1, 0) {
            return true;
        }
        self.lock();
        false
    }

    /// Rotate clockwise, trying the horizontal wall kicks in order.
    ///
    /// The first kick that yields a valid placement wins. If none does, the
    /// saved rotation index and offset are restored together.
    pub fn rotate(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }

        let saved = self.current.pose();
        self.current.rotate();
        let rotated = self.current.pose();

        for kick in WALL_KICKS {
            self.current.set_pose(rotated);
            self.current.move_by(0, kick);
            if self.placement_valid() {
                return true;
            }
        }

        self.current.set_pose(saved);
        false
    }

    /// Drop the shape as far as it goes and lock it.
    ///
    /// Awards the hard-drop bonus for each row descended and returns that row count.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.is_active() {
            return 0;
        }

        let mut rows = 0u32;
        while self.try_shift(1, 0) {
            rows += 1;
        }
        self.update_score(0, drop_points(rows, true));
        self.lock();
        rows
    }

    /// One manual step down with the soft-drop bonus when the shape moved.
    pub fn soft_drop(&mut self) -> bool {
        let moved = self.move_down();
        if moved {
            self.update_score(0, drop_points(1, false));
        }
        moved
    }

    /// Fix the current shape into the grid, promote the next shape, clear rows,
    /// score them and detect a blocked spawn.
    fn lock(&mut self) {
        let id = self.current.kind();
        for cell in self.current.cell_positions() {
            self.grid.set_cell(cell.row, cell.column, id);
        }

        self.current = self.next;
        self.next = Shape::new(self.bag.draw());
        self.gravity_timer_ms = 0;

        let cleared = self.grid.clear_full_rows();
        let line_clear_score = if cleared > 0 {
            self.update_score(cleared, 0)
        } else {
            0
        };

        let game_over = !self.block_fits();
        if game_over {
            self.phase = GamePhase::GameOver;
            self.game_result = Some(GameResult {
                score: self.score,
                level: self.level,
                lines: self.lines,
                difficulty: self.difficulty,
            });
        }

        self.last_event = Some(LockEvent {
            lines_cleared: cleared,
            line_clear_score,
            game_over,
        });
    }

    /// Add line-clear points (multiplied by level) plus an unmultiplied bonus,
    /// accumulate the cleared lines and re-check the level.
    ///
    /// Returns the line-clear points awarded (bonus excluded).
    pub fn update_score(&mut self, lines_cleared: u32, bonus_points: u32) -> u32 {
        let points = line_clear_points(lines_cleared, self.level);
        self.score = self
            .score
            .saturating_add(points)
            .saturating_add(bonus_points);
        self.lines = self.lines.saturating_add(lines_cleared);
        self.check_level_up();
        points
    }

    /// Recompute the level from cumulative lines; on increase, speed up gravity.
    ///
    /// Returns true if the level went up.
    pub fn check_level_up(&mut self) -> bool {
        let new_level = level_for_lines(self.lines);
        if new_level <= self.level {
            return false;
        }
        self.level = new_level;
        self.fall_interval_ms = fall_interval_ms(self.base_fall_interval_ms, self.level);
        true
    }

    /// Suspend gravity and movement. Returns whether the phase changed.
    pub fn pause(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.phase = GamePhase::Paused;
        true
    }

    /// Leave the paused phase. Returns whether the phase changed.
    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.phase = GamePhase::Active;
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Active => self.pause(),
            GamePhase::Paused => self.resume(),
            GamePhase::GameOver => false,
        }
    }

    /// Fresh session on the same configuration.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.bag.reset();
        self.current = Shape::new(self.bag.draw());
        self.next = Shape::new(self.bag.draw());
        self.phase = GamePhase::Active;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.fall_interval_ms = fall_interval_ms(self.base_fall_interval_ms, 1);
        self.gravity_timer_ms = 0;
        self.last_event = None;
        self.game_result = None;
    }

    /// Advance gravity by `elapsed_ms`. Returns true if a gravity step ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.gravity_timer_ms = self.gravity_timer_ms.saturating_add(elapsed_ms);
        if self.gravity_timer_ms < self.fall_interval_ms {
            return false;
        }
        self.gravity_timer_ms = 0;
        self.move_down();
        true
    }

    /// Dispatch an input event. Returns whether it changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::MoveDown => {
                let was_active = self.is_active();
                self.soft_drop();
                was_active
            }
            GameAction::Rotate => self.rotate(),
            GameAction::HardDrop => {
                let was_active = self.is_active();
                self.hard_drop();
                was_active
            }
            GameAction::Pause => self.pause(),
            GameAction::Resume => self.resume(),
            GameAction::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Take the final tallies once the session has ended.
    pub fn take_game_result(&mut self) -> Option<GameResult> {
        self.game_result.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_rows(&mut out.grid);
        out.current = PieceSnapshot::from(&self.current);
        out.next = PreviewSnapshot::from(&self.next);
        out.phase = self.phase;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.fall_interval_ms = self.fall_interval_ms;
        out.difficulty = self.difficulty;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
