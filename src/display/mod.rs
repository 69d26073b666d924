/// Rendering layer. All terminal I/O lives here.
///
/// The draw list is painted into a [`Canvas`] of terminal cells, scaling the
/// 288 × 512 world proportionally onto whatever size the terminal has, and
/// the canvas is then written out row by row. No game logic is performed.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::assets::{Assets, Sprite};
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::entities::Rect;
use crate::scene::{screen_rect, DrawItem};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_NOSE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

const HINT: &str = "CLICK / SPACE : Jump   Q : Quit";

// ── Cell buffer ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub color: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    color: Color::Reset,
};

pub struct Canvas {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![BLANK; cols as usize * rows as usize],
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<Cell> {
        if col < self.cols && row < self.rows {
            Some(self.cells[row as usize * self.cols as usize + col as usize])
        } else {
            None
        }
    }

    fn put(&mut self, col: i32, row: i32, ch: char, color: Color) {
        if col >= 0 && row >= 0 && col < self.cols as i32 && row < self.rows as i32 {
            self.cells[row as usize * self.cols as usize + col as usize] = Cell { ch, color };
        }
    }

    /// Cell span `[col0, col1) × [row0, row1)` covered by a world rectangle.
    pub fn cell_span(&self, rect: &Rect) -> (i32, i32, i32, i32) {
        let cx = |x: i32| (x as i64 * self.cols as i64).div_euclid(SCREEN_WIDTH as i64) as i32;
        let cy = |y: i32| (y as i64 * self.rows as i64).div_euclid(SCREEN_HEIGHT as i64) as i32;
        let (col0, row0) = (cx(rect.left()), cy(rect.top()));
        // Anything with a size covers at least one cell.
        let col1 = cx(rect.right()).max(col0 + 1);
        let row1 = cy(rect.bottom()).max(row0 + 1);
        (col0, row0, col1, row1)
    }

    /// Draw a sprite over a world rectangle, optionally mirrored vertically.
    pub fn blit(&mut self, sprite: &Sprite, rect: &Rect, flipped: bool) {
        let (col0, row0, col1, row1) = self.cell_span(rect);
        let span = ((col1 - col0) as usize, (row1 - row0) as usize);
        for row in row0.max(0)..row1.min(self.rows as i32) {
            let local_row = if flipped { row1 - 1 - row } else { row - row0 };
            for col in col0.max(0)..col1.min(self.cols as i32) {
                let ch = sprite.sample((col - col0) as usize, local_row as usize, span);
                if ch != ' ' {
                    self.put(col, row, ch, sprite.color);
                }
            }
        }
    }

    fn text(&mut self, col: i32, row: i32, text: &str, color: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, color);
        }
    }
}

// ── Painting ──────────────────────────────────────────────────────────────────

/// Glyph drawn at the actor's nose to show its tilt.
pub fn nose_glyph(rotation: f32) -> char {
    let angle = rotation.rem_euclid(360.0);
    if !(20.0..340.0).contains(&angle) {
        '>'
    } else if angle < 180.0 {
        '/'
    } else {
        '\\'
    }
}

fn draw_actor(canvas: &mut Canvas, sprite: &Sprite, rect: &Rect, rotation: f32) {
    canvas.blit(sprite, rect, false);
    let (_, row0, col1, row1) = canvas.cell_span(rect);
    canvas.put(col1 - 1, (row0 + row1 - 1) / 2, nose_glyph(rotation), C_NOSE);
}

fn draw_controls_hint(canvas: &mut Canvas) {
    let row = canvas.rows as i32 - 1;
    canvas.text(1, row, HINT, C_HINT);
}

/// Paint a whole draw list onto a fresh canvas.
pub fn paint(canvas: &mut Canvas, items: &[DrawItem], assets: &Assets) {
    canvas.cells.fill(BLANK);

    for item in items {
        match item {
            DrawItem::Background(backdrop) => {
                canvas.blit(assets.background(*backdrop), &screen_rect(), false)
            }
            DrawItem::Obstacle {
                rect,
                skin,
                flipped,
            } => canvas.blit(assets.obstacle(*skin), rect, *flipped),
            DrawItem::Terrain(rect) => canvas.blit(&assets.terrain, rect, false),
            DrawItem::Actor {
                rect,
                frame,
                rotation,
            } => draw_actor(canvas, assets.actor_frame(*frame), rect, *rotation),
            DrawItem::Digit { digit, rect } => canvas.blit(assets.digit(*digit), rect, false),
            DrawItem::Logo(rect) => canvas.blit(&assets.logo, rect, false),
            DrawItem::GameOver(rect) => canvas.blit(&assets.game_over, rect, false),
        }
    }

    draw_controls_hint(canvas);
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Write one complete frame.
pub fn render<W: Write>(out: &mut W, canvas: &Canvas) -> std::io::Result<()> {
    let mut current = Color::Reset;
    out.queue(style::ResetColor)?;

    for row in 0..canvas.rows {
        out.queue(cursor::MoveTo(0, row))?;
        let mut run = String::with_capacity(canvas.cols as usize);
        let start = row as usize * canvas.cols as usize;
        for cell in &canvas.cells[start..start + canvas.cols as usize] {
            if cell.color != current && cell.ch != ' ' {
                out.queue(Print(&run))?;
                run.clear();
                out.queue(style::SetForegroundColor(cell.color))?;
                current = cell.color;
            }
            run.push(cell.ch);
        }
        out.queue(Print(&run))?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, canvas.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Canvas matching the current terminal size.
pub fn canvas_for_terminal() -> std::io::Result<Canvas> {
    let (cols, rows) = terminal::size()?;
    Ok(Canvas::new(cols, rows))
}
