//! Terminal front end: screen setup, drawing, and mapping clicks back onto
//! the board.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::hanoi::{HanoiState, Tower, MAX_DISKS};
use crate::puzzle::{Position, PuzzleState, EMPTY, SIZE, TARGET};

pub const ORIGIN_X: u16 = 2;
pub const ORIGIN_Y: u16 = 2;

/// Cell pitch on screen, including a one-character gap on the right/bottom.
pub const CELL_W: u16 = 6;
pub const CELL_H: u16 = 3;

/// Column width reserved for one tower: the widest disk plus a margin.
pub const TOWER_W: u16 = 2 * MAX_DISKS as u16 + 3;
pub const TOWER_H: u16 = MAX_DISKS as u16 + 2;

/// Per-frame presentation state that the puzzle logic never sees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    pub highlight: Option<Position>,
    pub finished: bool,
    pub message: Option<String>,
}

/// Grid cell under a screen coordinate, ignoring the gaps between tiles.
pub fn fifteen_hit(column: u16, row: u16) -> Option<Position> {
    let dx = column.checked_sub(ORIGIN_X)?;
    let dy = row.checked_sub(ORIGIN_Y)?;
    if dx % CELL_W == CELL_W - 1 || dy % CELL_H == CELL_H - 1 {
        return None;
    }

    let pos = Position::new((dx / CELL_W) as usize, (dy / CELL_H) as usize);
    pos.in_bounds().then_some(pos)
}

/// Tower whose column contains a screen coordinate.
pub fn hanoi_hit(column: u16, row: u16) -> Option<Tower> {
    let dx = column.checked_sub(ORIGIN_X)?;
    let dy = row.checked_sub(ORIGIN_Y)?;
    if dy >= TOWER_H {
        return None;
    }
    Tower::from_index((dx / TOWER_W) as usize)
}

fn cell_origin(pos: Position) -> (u16, u16) {
    (
        ORIGIN_X + pos.col as u16 * CELL_W,
        ORIGIN_Y + pos.row as u16 * CELL_H,
    )
}

pub fn render_fifteen<W: Write>(out: &mut W, state: &PuzzleState, overlay: &Overlay) -> io::Result<()> {
    queue!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(ORIGIN_X, 0),
        SetAttribute(Attribute::Bold),
        Print("Fifteen"),
        SetAttribute(Attribute::Reset)
    )?;

    for (i, &tile) in state.cells().iter().enumerate() {
        if tile == EMPTY {
            continue;
        }
        let pos = Position::from_index(i);
        let (x, y) = cell_origin(pos);

        let bg = if overlay.finished {
            Color::DarkYellow
        } else if overlay.highlight == Some(pos) {
            Color::DarkCyan
        } else if TARGET[i] == tile {
            Color::DarkGreen
        } else {
            Color::DarkBlue
        };

        let width = (CELL_W - 1) as usize;
        queue!(
            out,
            SetBackgroundColor(bg),
            SetForegroundColor(Color::White),
            cursor::MoveTo(x, y),
            Print(format!("{:^width$}", tile)),
            cursor::MoveTo(x, y + 1),
            Print(" ".repeat(width)),
            ResetColor
        )?;
    }

    let status_y = ORIGIN_Y + SIZE as u16 * CELL_H;
    queue!(
        out,
        cursor::MoveTo(ORIGIN_X, status_y),
        Print(format!(
            "Moves: {}   Distance: {}",
            state.moves(),
            state.misplaced_distance()
        )),
        cursor::MoveTo(ORIGIN_X, status_y + 1),
        Print("arrows/wasd or click: slide   r: reshuffle   q: quit"),
    )?;
    render_message(out, status_y + 3, overlay)?;
    out.flush()
}

pub fn render_hanoi<W: Write>(out: &mut W, state: &HanoiState, overlay: &Overlay) -> io::Result<()> {
    queue!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(ORIGIN_X, 0),
        SetAttribute(Attribute::Bold),
        Print(format!("Tower of Hanoi ({} disks)", state.disks())),
        SetAttribute(Attribute::Reset)
    )?;

    let base_y = ORIGIN_Y + TOWER_H - 1;
    for tower in Tower::ALL {
        let center = ORIGIN_X + tower.index() as u16 * TOWER_W + TOWER_W / 2;
        let rod = if state.selected() == Some(tower) {
            Color::Yellow
        } else {
            Color::Grey
        };

        for dy in 0..TOWER_H - 1 {
            queue!(
                out,
                cursor::MoveTo(center, ORIGIN_Y + dy),
                SetForegroundColor(rod),
                Print("|"),
                ResetColor
            )?;
        }

        for (level, &disk) in state.tower(tower).iter().enumerate() {
            let width = 2 * disk as u16 + 1;
            let bg = if overlay.finished {
                Color::DarkYellow
            } else {
                Color::DarkMagenta
            };
            queue!(
                out,
                cursor::MoveTo(center - disk as u16, base_y - 1 - level as u16),
                SetBackgroundColor(bg),
                Print(format!("{:^w$}", disk, w = width as usize)),
                ResetColor
            )?;
        }

        queue!(
            out,
            cursor::MoveTo(center - 1, base_y),
            Print(format!("[{}]", tower.index() + 1))
        )?;
    }

    let status_y = ORIGIN_Y + TOWER_H + 1;
    queue!(
        out,
        cursor::MoveTo(ORIGIN_X, status_y),
        Print(format!(
            "Moves: {}   Best possible: {}",
            state.moves(),
            state.minimum_moves()
        )),
        cursor::MoveTo(ORIGIN_X, status_y + 1),
        Print("1/2/3 or click: pick tower   +/-: disks   r: restart   q: quit"),
    )?;
    render_message(out, status_y + 3, overlay)?;
    out.flush()
}

fn render_message<W: Write>(out: &mut W, y: u16, overlay: &Overlay) -> io::Result<()> {
    if let Some(message) = &overlay.message {
        queue!(
            out,
            cursor::MoveTo(ORIGIN_X, y),
            SetForegroundColor(Color::Yellow),
            Print(message),
            ResetColor
        )?;
    }
    Ok(())
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(EnableMouseCapture)?;
        self.buf.queue(cursor::Hide)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(DisableMouseCapture)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn draw_fifteen(&mut self, state: &PuzzleState, overlay: &Overlay) -> Result<()> {
        self.buf.clear();
        render_fifteen(&mut self.buf, state, overlay)?;
        self.flush_buf()
    }

    pub fn draw_hanoi(&mut self, state: &HanoiState, overlay: &Overlay) -> Result<()> {
        self.buf.clear();
        render_hanoi(&mut self.buf, state, overlay)?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_inside_tile_resolves_position() {
        assert_eq!(fifteen_hit(ORIGIN_X, ORIGIN_Y), Some(Position::new(0, 0)));
        assert_eq!(
            fifteen_hit(ORIGIN_X + 3 * CELL_W + 1, ORIGIN_Y + 2 * CELL_H + 1),
            Some(Position::new(3, 2))
        );
    }

    #[test]
    fn test_click_in_gap_or_outside_misses() {
        assert_eq!(fifteen_hit(ORIGIN_X + CELL_W - 1, ORIGIN_Y), None);
        assert_eq!(fifteen_hit(ORIGIN_X, ORIGIN_Y + CELL_H - 1), None);
        assert_eq!(fifteen_hit(0, 0), None);
        assert_eq!(fifteen_hit(ORIGIN_X + 4 * CELL_W, ORIGIN_Y), None);
    }

    #[test]
    fn test_click_picks_tower_by_column() {
        assert_eq!(hanoi_hit(ORIGIN_X, ORIGIN_Y), Some(Tower::Left));
        assert_eq!(hanoi_hit(ORIGIN_X + TOWER_W, ORIGIN_Y + 3), Some(Tower::Middle));
        assert_eq!(hanoi_hit(ORIGIN_X + 3 * TOWER_W - 1, ORIGIN_Y), Some(Tower::Right));
        assert_eq!(hanoi_hit(ORIGIN_X + 3 * TOWER_W, ORIGIN_Y), None);
        assert_eq!(hanoi_hit(ORIGIN_X, ORIGIN_Y + TOWER_H), None);
    }

    #[test]
    fn test_fifteen_frame_shows_tiles_and_message() {
        let mut out = Vec::new();
        let overlay = Overlay {
            finished: true,
            message: Some("Solved in 0 moves".to_string()),
            ..Overlay::default()
        };
        render_fifteen(&mut out, &PuzzleState::solved(), &overlay).unwrap();

        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("13"));
        assert!(text.contains("Moves: 0"));
        assert!(text.contains("Solved in 0 moves"));
    }

    #[test]
    fn test_hanoi_frame_shows_counts() {
        let mut out = Vec::new();
        let state = HanoiState::new(MAX_DISKS).unwrap();
        render_hanoi(&mut out, &state, &Overlay::default()).unwrap();

        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("10 disks"));
        assert!(text.contains("Best possible: 1023"));
    }
}
