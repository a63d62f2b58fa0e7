//! TextTerminal: flushes rendered text lines to a real terminal.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{cursor, style::Print, terminal, QueueableCommand};

pub struct TextTerminal {
    stdout: io::Stdout,
    buf: Vec<u8>,
    last: Vec<String>,
}

impl TextTerminal {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(4 * 1024),
            last: Vec::new(),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last.clear();
    }

    /// Draw `lines`, skipping the write when nothing changed since the last frame.
    pub fn draw(&mut self, lines: &[String]) -> Result<()> {
        if self.last.as_slice() == lines {
            return Ok(());
        }
        self.buf.clear();
        encode_lines_into(lines, &mut self.buf)?;
        self.flush_buf()?;
        self.last.clear();
        self.last.extend_from_slice(lines);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TextTerminal {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a full-screen redraw of `lines` into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_lines_into(lines: &[String], out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;
    for (i, line) in lines.iter().enumerate() {
        out.queue(Print(line))?;
        if i + 1 < lines.len() {
            out.queue(Print("\r\n"))?;
        }
    }
    Ok(())
}
