//! Screen drawing for session snapshots.
//!
//! The bottom row is the status bar; every row above it shows one buffer
//! line, scrolled vertically so the cursor row stays visible. Long lines
//! are cut at the screen width.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;

use ropepad_core::Snapshot;

/// Default status bar contents when no message is pending.
pub fn status_line(snapshot: &Snapshot) -> String {
    match &snapshot.status {
        Some(message) => message.clone(),
        None => format!(
            "File: {} | Row:{} Col:{} | Ctrl-Q:Quit Ctrl-S:Save Ctrl-F:Find",
            snapshot.filename, snapshot.cursor_row, snapshot.cursor_col
        ),
    }
}

/// Pads or cuts `text` to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let mut fitted: String = text.chars().take(width).collect();
    let len = fitted.chars().count();
    fitted.extend(std::iter::repeat(' ').take(width - len));
    fitted
}

/// Draws snapshots onto any writer with crossterm commands.
pub struct Renderer<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    row_offset: usize,
    show_tildes: bool,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, cols: u16, rows: u16, show_tildes: bool) -> Self {
        Self {
            out,
            cols: cols.max(1),
            rows: rows.max(2),
            row_offset: 0,
            show_tildes,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(2);
    }

    /// Rows available for text, excluding the status bar.
    pub fn text_rows(&self) -> usize {
        usize::from(self.rows) - 1
    }

    /// Index of the first buffer line on screen.
    pub fn row_offset(&self) -> usize {
        self.row_offset
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Adjusts the scroll position so 1-indexed `cursor_row` is on screen.
    fn scroll_to(&mut self, cursor_row: usize) {
        let line = cursor_row.saturating_sub(1);
        let height = self.text_rows();
        if line < self.row_offset {
            self.row_offset = line;
        } else if line >= self.row_offset + height {
            self.row_offset = line + 1 - height;
        }
    }

    /// Draws the whole screen and places the cursor.
    pub fn draw(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        self.scroll_to(snapshot.cursor_row);
        let width = usize::from(self.cols);
        queue!(self.out, Hide)?;

        for y in 0..self.text_rows() {
            queue!(self.out, MoveTo(0, y as u16), Clear(ClearType::UntilNewLine))?;
            match snapshot.lines.get(self.row_offset + y) {
                Some(line) => {
                    let visible = &line[..line.len().min(width)];
                    queue!(self.out, Print(String::from_utf8_lossy(visible)))?;
                }
                None if self.show_tildes => queue!(self.out, Print("~"))?,
                None => {}
            }
        }

        self.draw_status(&status_line(snapshot))?;

        let x = snapshot.cursor_col.saturating_sub(1).min(width - 1);
        let y = snapshot.cursor_row.saturating_sub(1) - self.row_offset;
        queue!(self.out, MoveTo(x as u16, y as u16), Show)?;
        self.out.flush()
    }

    /// Replaces the status bar with a prompt and its current input.
    pub fn draw_prompt(&mut self, label: &str, input: &str) -> io::Result<()> {
        let text = format!("{label} {input}");
        self.draw_status(&text)?;
        let x = text.chars().count().min(usize::from(self.cols) - 1);
        queue!(self.out, MoveTo(x as u16, self.rows - 1), Show)?;
        self.out.flush()
    }

    /// Blanks the screen and homes the cursor.
    pub fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0), Show)?;
        self.out.flush()
    }

    fn draw_status(&mut self, text: &str) -> io::Result<()> {
        queue!(
            self.out,
            MoveTo(0, self.rows - 1),
            Clear(ClearType::CurrentLine),
            SetAttribute(Attribute::Reverse),
            Print(fit(text, usize::from(self.cols))),
            SetAttribute(Attribute::Reset)
        )
    }
}
