use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{GameSnapshot, GameState, Grid, SessionConfig};
use blockfall::term::{FrameBuffer, GameView, Viewport};
use blockfall::types::{Difficulty, GameAction, PieceKind};

fn new_game() -> GameState {
    GameState::new(SessionConfig::new(12345, Difficulty::Medium))
}

fn bench_tick(c: &mut Criterion) {
    let mut state = new_game();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if state.game_over() {
                state.reset();
            }
            state.tick(black_box(16));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new();
            for row in 16..20 {
                for column in 0..10 {
                    grid.set_cell(row, column, PieceKind::I);
                }
            }
            black_box(grid.clear_full_rows());
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut state = new_game();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if state.game_over() {
                state.reset();
            }
            black_box(state.hard_drop());
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut state = new_game();

    c.bench_function("move_left_right", |b| {
        b.iter(|| {
            state.apply_action(GameAction::MoveLeft);
            state.apply_action(GameAction::MoveRight);
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = new_game();
    state.move_down();

    c.bench_function("rotate_with_kicks", |b| {
        b.iter(|| {
            black_box(state.rotate());
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let state = new_game();
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("snapshot_and_render_80x24", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(80, 24), &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_hard_drop,
    bench_move,
    bench_rotate,
    bench_render
);
criterion_main!(benches);
