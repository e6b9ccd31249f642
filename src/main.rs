//! Terminal runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `blockfall-term`.
//! Finished games are stamped into score records and saved to the ranked list.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::config::Cli;
use blockfall::core::{GameSnapshot, GameState, SessionConfig};
use blockfall::input::{should_quit, InputHandler};
use blockfall::scores::{HighScores, ScoreRecord};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut scores = HighScores::load(&cli.scores_file);

    if cli.show_scores {
        print_scores(&scores);
        return Ok(());
    }

    let config = cli.session_config();
    let mut session = Session::new(cli.player_name(), config);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = session.run(&mut term, &mut scores);

    // Always try to restore terminal state.
    let _ = term.exit();

    // Diagnostics only once the alternate screen is gone.
    for note in &session.notes {
        eprintln!("{}", note);
    }
    result
}

struct Session {
    player: String,
    game: GameState,
    input: InputHandler,
    pieces_locked: u32,
    notes: Vec<String>,
}

impl Session {
    fn new(player: &str, config: SessionConfig) -> Self {
        Self {
            player: player.to_string(),
            game: GameState::new(config),
            input: InputHandler::new(),
            pieces_locked: 0,
            notes: Vec::new(),
        }
    }

    fn run(&mut self, term: &mut TerminalRenderer, scores: &mut HighScores) -> Result<()> {
        let view = GameView::default();
        let mut snap = GameSnapshot::default();
        let mut fb = FrameBuffer::new(0, 0);

        let tick_duration = Duration::from_millis(TICK_MS as u64);
        let mut last_tick = Instant::now();

        loop {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            self.game.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;

            let timeout = tick_duration
                .checked_sub(last_tick.elapsed())
                .unwrap_or(Duration::ZERO);

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => match key.kind {
                        KeyEventKind::Press => {
                            if should_quit(key) {
                                return Ok(());
                            }
                            if let Some(action) = self.input.handle_key_event(key) {
                                self.apply(action);
                            }
                        }
                        KeyEventKind::Repeat => {
                            // The input handler produces its own repeats.
                        }
                        KeyEventKind::Release => {
                            self.input.handle_key_release(key.code);
                        }
                    },
                    Event::Resize(_, _) => term.invalidate(),
                    _ => {}
                }
            }

            if last_tick.elapsed() >= tick_duration {
                last_tick = Instant::now();
                for action in self.input.update(TICK_MS) {
                    self.apply(action);
                }
                self.game.tick(TICK_MS);
            }

            self.collect_events(scores);
        }
    }

    fn apply(&mut self, action: GameAction) {
        let action = match action {
            GameAction::Pause if self.game.paused() => GameAction::Resume,
            other => other,
        };
        if action == GameAction::Reset {
            self.input.reset();
            self.pieces_locked = 0;
        }
        self.game.apply_action(action);
    }

    fn collect_events(&mut self, scores: &mut HighScores) {
        if self.game.take_last_event().is_some() {
            self.pieces_locked += 1;
        }

        let Some(result) = self.game.take_game_result() else {
            return;
        };
        let record = ScoreRecord::from_result(&self.player, &result);
        match scores.submit(record) {
            Ok(Some(rank)) => self.notes.push(format!(
                "[Scores] {} scored {} ({} lines, {} pieces): rank #{}",
                self.player, result.score, result.lines, self.pieces_locked, rank
            )),
            Ok(None) => self.notes.push(format!(
                "[Scores] {} scored {} ({} lines, {} pieces): not in the top list",
                self.player, result.score, result.lines, self.pieces_locked
            )),
            Err(e) => self
                .notes
                .push(format!("[Scores] failed to save score: {:#}", e)),
        }
    }
}

fn print_scores(scores: &HighScores) {
    if scores.is_empty() {
        println!("No scores yet ({}).", scores.path().display());
        return;
    }

    println!(
        "{:>4}  {:<16} {:>8}  {:<10} {:>5} {:>6}  {}",
        "RANK", "PLAYER", "SCORE", "DIFFICULTY", "LEVEL", "LINES", "DATE"
    );
    for (i, r) in scores.records().iter().enumerate() {
        let date: String = r.timestamp.chars().take(16).collect();
        println!(
            "{:>4}  {:<16} {:>8}  {:<10} {:>5} {:>6}  {}",
            i + 1,
            r.player,
            r.score,
            r.difficulty,
            r.level,
            r.lines,
            date.replace('T', " ")
        );
    }
}
