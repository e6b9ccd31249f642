use blockfall::core::{GameState, SessionConfig};
use blockfall::term::{piece_color, AnchorY, GameView, Viewport};
use blockfall::types::{Difficulty, GameAction, PieceKind};

fn snapshot() -> blockfall::core::GameSnapshot {
    GameState::new(SessionConfig::new(1, Difficulty::Medium)).snapshot()
}

#[test]
fn term_view_renders_border_corners() {
    let snap = snapshot();
    let view = GameView::default();

    // 10 cells * 2 columns + border = 22 wide, 20 rows + border = 22 high.
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = snapshot();
    snap.grid[19][0] = PieceKind::Z.id();

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    let (x0, y0) = (1, 1 + 19);
    assert_eq!(fb.get(x0, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0, y0).unwrap().style.fg, piece_color(PieceKind::Z));
    // Neighbor stays empty.
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_top_anchor() {
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snapshot(), Viewport::new(80, 40));
    let frame = view.frame_rect(Viewport::new(80, 40));
    assert_eq!(frame.y, 0);
    assert_eq!(fb.get(frame.x, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_next_preview_matches_piece() {
    let game = GameState::new(SessionConfig::new(3, Difficulty::Medium));
    let snap = game.snapshot();
    let view = GameView::default().with_help(false);
    let vp = Viewport::new(80, 24);
    let fb = view.render(&snap, vp);

    let (next_x, next_y) = fb.find_text("NEXT").expect("NEXT label");
    let color = piece_color(snap.next.kind);
    let colored = (next_y + 1..next_y + 1 + snap.next.height as u16)
        .flat_map(|y| (next_x..next_x + snap.next.width as u16 * 2).map(move |x| (x, y)))
        .filter(|&(x, y)| {
            let cell = fb.get(x, y).unwrap();
            cell.ch == '█' && cell.style.fg == color
        })
        .count();
    // Four cells, each two columns wide.
    assert_eq!(colored, 8);
}

#[test]
fn term_view_score_updates() {
    let mut game = GameState::new(SessionConfig::new(3, Difficulty::Medium));
    game.apply_action(GameAction::HardDrop);
    let fb = GameView::default().render(&game.snapshot(), Viewport::new(80, 24));
    let (x, y) = fb.find_text("SCORE").unwrap();
    let value: String = fb.row_text(y + 1).chars().skip(x as usize).take_while(|c| c.is_ascii_digit()).collect();
    assert_eq!(value, game.score().to_string());
}
