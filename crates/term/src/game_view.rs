//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, PreviewSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GamePhase, PieceKind, GRID_COLUMNS, GRID_ROWS};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// Narrowest side panel worth drawing.
const MIN_PANEL_WIDTH: u16 = 12;

const KEY_HELP: [&str; 7] = [
    "←→  move",
    "↑   rotate",
    "↓   soft drop",
    "SPC hard drop",
    "P   pause",
    "R   restart",
    "Q   quit",
];

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the playfield frame landed in the last layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    show_help: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
            show_help: true,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_help(mut self, show_help: bool) -> Self {
        self.show_help = show_help;
        self
    }

    /// Playfield frame position for a viewport (border included).
    pub fn frame_rect(&self, viewport: Viewport) -> FrameRect {
        let w = GRID_COLUMNS as u16 * self.cell_w + 2;
        let h = GRID_ROWS as u16 * self.cell_h + 2;
        // Leave room for the side panel when centering horizontally.
        let total_w = w + 2 + 16;
        let x = viewport.width.saturating_sub(total_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        FrameRect { x, y, w, h }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let frame = self.frame_rect(viewport);
        let play = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            frame.w - 2,
            frame.h - 2,
            ' ',
            play,
        );
        draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG));

        for (row, cells) in snap.grid.iter().enumerate() {
            for (column, &id) in cells.iter().enumerate() {
                let (row, column) = (row as u16, column as u16);
                match PieceKind::from_id(id) {
                    Some(kind) => self.draw_grid_cell(fb, frame, row, column, kind),
                    None => self.fill_cell_rect(fb, frame, row, column, '·', play),
                }
            }
        }

        // Rows above the top of the grid are not drawn.
        for cell in snap.current.cells {
            if cell.row < 0 || cell.column < 0 {
                continue;
            }
            let (row, column) = (cell.row as u16, cell.column as u16);
            if row < GRID_ROWS as u16 && column < GRID_COLUMNS as u16 {
                self.draw_grid_cell(fb, frame, row, column, snap.current.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.phase {
            GamePhase::Active => {}
            GamePhase::Paused => {
                draw_overlay(fb, frame, &["PAUSED", "P to resume"]);
            }
            GamePhase::GameOver => {
                let mut score_line = [0u8; 24];
                let score_text = format_score_line(&mut score_line, snap.score);
                draw_overlay(fb, frame, &["GAME OVER", score_text, "R to restart"]);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_grid_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: FrameRect,
        row: u16,
        column: u16,
        kind: PieceKind,
    ) {
        let style = CellStyle::new(piece_color(kind), PLAY_BG).bold();
        self.fill_cell_rect(fb, frame, row, column, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: FrameRect,
        row: u16,
        column: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + column * self.cell_w;
        let py = frame.y + 1 + row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: FrameRect,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < MIN_PANEL_WIDTH {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = frame.y;
        for (name, number) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, number, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "SPEED", label);
        let end = fb.put_u32(panel_x, y + 1, snap.fall_interval_ms, value);
        fb.put_str(end + 1, y + 1, "ms", value.dim());
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "DIFFICULTY", label);
        fb.put_str(panel_x, y + 1, snap.difficulty.label(), value);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        y = self.draw_preview(fb, &snap.next, panel_x, y);

        if self.show_help {
            y = y.saturating_add(1);
            let help = value.dim();
            for line in KEY_HELP {
                if y >= viewport.height {
                    break;
                }
                fb.put_str(panel_x, y, line, help);
                y = y.saturating_add(1);
            }
        }
    }

    /// Draw the next piece inside a box sized by its rotation table.
    /// Returns the row below the preview.
    fn draw_preview(&self, fb: &mut FrameBuffer, next: &PreviewSnapshot, x: u16, y: u16) -> u16 {
        let w = next.width as u16 * self.cell_w;
        let h = next.height as u16 * self.cell_h;
        fb.fill_rect(x, y, w, h, ' ', CellStyle::new(PLAY_BG, PLAY_BG));

        let style = CellStyle::new(piece_color(next.kind), PLAY_BG).bold();
        for cell in next.cells {
            if cell.row < 0 || cell.column < 0 {
                continue;
            }
            let px = x + cell.column as u16 * self.cell_w;
            let py = y + cell.row as u16 * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
        y.saturating_add(h)
    }
}

pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::Z => Rgb::new(220, 80, 80),
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: FrameRect, style: CellStyle) {
    let FrameRect { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Centered lines over the middle of the playfield.
fn draw_overlay(fb: &mut FrameBuffer, frame: FrameRect, lines: &[&str]) {
    let title = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
    let body = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG);

    let top = frame.y + frame.h / 2 - (lines.len() as u16) / 2;
    for (i, line) in lines.iter().enumerate() {
        let style = if i == 0 { title } else { body };
        fb.put_str_centered(frame.x, frame.w, top + i as u16, line, style);
    }
}

/// "SCORE <n>" into a stack buffer.
fn format_score_line(buf: &mut [u8; 24], score: u32) -> &str {
    const PREFIX: &[u8] = b"SCORE ";
    buf[..PREFIX.len()].copy_from_slice(PREFIX);

    let mut digits = [0u8; 10];
    let mut n = score;
    let mut len = 0;
    loop {
        digits[len] = b'0' + (n % 10) as u8;
        len += 1;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    for (i, d) in digits[..len].iter().rev().enumerate() {
        buf[PREFIX.len() + i] = *d;
    }
    std::str::from_utf8(&buf[..PREFIX.len() + len]).unwrap_or("SCORE")
}
