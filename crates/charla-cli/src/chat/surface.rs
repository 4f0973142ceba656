//! In-place redraw surface for the streaming response.
//!
//! Every delta re-renders the full response, so the previously printed
//! block is erased and reprinted. The cursor ends below the newest
//! content after each update, which keeps the latest text in view.

use std::io::{self, Write};

use crossterm::cursor::MoveUp;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

/// Tracks the printed block so it can be erased before the next redraw.
///
/// Line accounting assumes the rendered output fits the terminal width;
/// wrapped lines skew the erase count.
#[derive(Debug, Default)]
pub struct StreamingSurface {
    lines_printed: u16,
}

impl StreamingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the previously printed block with `rendered`.
    pub fn update(&mut self, rendered: &str) -> io::Result<()> {
        let mut out = io::stdout();
        if self.lines_printed > 0 {
            execute!(out, MoveUp(self.lines_printed), Clear(ClearType::FromCursorDown))?;
        }

        let block = if rendered.ends_with('\n') {
            rendered.to_string()
        } else {
            format!("{rendered}\n")
        };
        out.write_all(block.as_bytes())?;
        out.flush()?;

        self.lines_printed = block.matches('\n').count().min(u16::MAX as usize) as u16;
        Ok(())
    }

    /// Leave the current block in place and start fresh below it.
    pub fn detach(&mut self) {
        self.lines_printed = 0;
    }
}
