//! Terminal front-end drawing
//!
//! Turns a [`Snapshot`] into a grid of two-column terminal cells and only
//! redraws the cells that changed since the last frame.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::components::{GhostColor, Rect};
use crate::session::{format_clock, SessionState, Snapshot};

const CELL_W: usize = 2;
const WALL_COLOR: Color = Color::Rgb {
    r: 229,
    g: 255,
    b: 0,
};
const PELLET_STYLES: [&str; 4] = ["⚽", "🏀", "🏈", "⚾"];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Glyph {
    Player,
    Ghost,
    Frightened,
    Wall,
    Empty,
    Pellet,
    Power(u32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub glyph: Glyph,
    pub color: Color,
}

const EMPTY: Cell = Cell {
    glyph: Glyph::Empty,
    color: Color::Reset,
};

pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    last_footer: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            last: vec![EMPTY; columns * rows],
            last_hud: String::new(),
            last_footer: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }
}

fn ghost_color(color: GhostColor) -> Color {
    match color {
        GhostColor::Blue => Color::Blue,
        // Black on a black terminal would vanish.
        GhostColor::Black => Color::DarkGrey,
        GhostColor::Red => Color::Red,
        GhostColor::Yellow => Color::Yellow,
        GhostColor::Green => Color::Green,
    }
}

/// Grid cell a box is drawn in: the one holding its centre.
fn cell_of(rect: &Rect, tile: i32, columns: usize, rows: usize) -> Option<usize> {
    let (cx, cy) = rect.center();
    if cx < 0 || cy < 0 {
        return None;
    }
    let (col, row) = ((cx / tile) as usize, (cy / tile) as usize);
    (col < columns && row < rows).then_some(row * columns + col)
}

/// Lay out one frame: maze first, then ghosts, then the player on top.
pub fn compose(snapshot: &Snapshot<'_>) -> Vec<Cell> {
    let (tile, columns, rows) = (snapshot.tile_size, snapshot.columns, snapshot.rows);
    let mut cells = vec![EMPTY; columns * rows];
    let mut put = |rect: &Rect, cell: Cell| {
        if let Some(idx) = cell_of(rect, tile, columns, rows) {
            cells[idx] = cell;
        }
    };

    for wall in snapshot.walls {
        put(
            wall,
            Cell {
                glyph: Glyph::Wall,
                color: WALL_COLOR,
            },
        );
    }
    for dot in snapshot.dots {
        put(
            dot,
            Cell {
                glyph: Glyph::Pellet,
                color: Color::White,
            },
        );
    }
    for pellet in snapshot.power_pellets {
        put(
            &pellet.rect,
            Cell {
                glyph: Glyph::Power(pellet.variant),
                color: Color::White,
            },
        );
    }
    for ghost in snapshot.ghosts.iter().filter(|g| g.visible) {
        let cell = if ghost.vulnerable {
            Cell {
                glyph: Glyph::Frightened,
                color: ghost_color(ghost.color),
            }
        } else {
            Cell {
                glyph: Glyph::Ghost,
                color: ghost_color(ghost.color),
            }
        };
        put(&ghost.rect, cell);
    }
    put(
        &snapshot.player.rect,
        Cell {
            glyph: Glyph::Player,
            color: Color::Yellow,
        },
    );
    cells
}

pub fn hud_line(snapshot: &Snapshot<'_>) -> String {
    format!(
        "Score: {}  Lives: {}  Time: {}  (q to quit)",
        snapshot.score,
        snapshot.lives,
        format_clock(snapshot.time_left)
    )
}

pub fn footer_line(snapshot: &Snapshot<'_>) -> String {
    match snapshot.state {
        SessionState::Playing => String::new(),
        SessionState::Lost => format!(
            "GAME OVER - Final Score: {} (r to retry, q to quit)",
            snapshot.score
        ),
        SessionState::Won => format!(
            "YOU WON! - Final Score: {} (r to play again, q to quit)",
            snapshot.score
        ),
    }
}

pub fn render<W: Write>(out: &mut W, snapshot: &Snapshot<'_>, renderer: &mut Renderer) -> io::Result<()> {
    let (columns, rows) = (snapshot.columns, snapshot.rows);
    let needed_h = (rows + 2) as u16;
    let needed_w = (columns * CELL_W) as u16;

    out.queue(MoveTo(0, 0))?;

    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        out.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        out.queue(Print(msg))?;
        out.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }
    if renderer.needs_full {
        out.queue(Clear(ClearType::All))?;
    }

    let hud = hud_line(snapshot);
    if renderer.needs_full || hud != renderer.last_hud {
        draw_line(out, renderer.origin_x, renderer.origin_y - 1, &hud, Color::White)?;
        renderer.last_hud = hud;
    }

    let frame = compose(snapshot);
    for (idx, cell) in frame.into_iter().enumerate() {
        if renderer.needs_full || cell != renderer.last[idx] {
            renderer.last[idx] = cell;
            draw_cell(out, renderer, idx % columns, idx / columns, cell)?;
        }
    }

    let footer = footer_line(snapshot);
    if renderer.needs_full || footer != renderer.last_footer {
        let color = match snapshot.state {
            SessionState::Won => WALL_COLOR,
            _ => Color::White,
        };
        draw_line(out, renderer.origin_x, renderer.origin_y + rows as u16, &footer, color)?;
        renderer.last_footer = footer;
    }
    renderer.needs_full = false;

    out.flush()?;
    Ok(())
}

fn draw_line<W: Write>(out: &mut W, x: u16, y: u16, text: &str, color: Color) -> io::Result<()> {
    out.queue(MoveTo(x, y))?;
    out.queue(Clear(ClearType::CurrentLine))?;
    out.queue(SetForegroundColor(color))?;
    out.queue(Print(text))?;
    out.queue(ResetColor)?;
    Ok(())
}

fn draw_cell<W: Write>(out: &mut W, renderer: &Renderer, x: usize, y: usize, cell: Cell) -> io::Result<()> {
    let text = match cell.glyph {
        Glyph::Player => "😃",
        Glyph::Ghost => "👻",
        Glyph::Frightened => "😱",
        Glyph::Wall => "██",
        Glyph::Empty => "  ",
        Glyph::Pellet => "· ",
        Glyph::Power(variant) => PELLET_STYLES[variant as usize % PELLET_STYLES.len()],
    };
    let x_pos = renderer.origin_x + (x * CELL_W) as u16;
    let y_pos = renderer.origin_y + y as u16;
    out.queue(MoveTo(x_pos, y_pos))?;
    out.queue(SetForegroundColor(cell.color))?;
    out.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            out.queue(Print(' '))?;
        }
    }
    out.queue(ResetColor)?;
    Ok(())
}
