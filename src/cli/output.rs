//! Output helper for the interactive session

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;

/// Writes prompts, rendered views and messages to the terminal
pub struct Output<W: Write> {
    writer: W,
    clear_screen: bool,
}

impl<W: Write> Output<W> {
    pub fn new(writer: W, clear_screen: bool) -> Self {
        Self {
            writer,
            clear_screen,
        }
    }

    /// Prints a prompt without a newline and flushes it
    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.writer, "{}", text)?;
        self.writer.flush()
    }

    /// Prints a line of text
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", text)
    }

    /// Prints a pre-rendered block (already newline-terminated)
    pub fn block(&mut self, text: &str) -> io::Result<()> {
        write!(self.writer, "{}", text)?;
        self.writer.flush()
    }

    /// Prints a success message
    pub fn success(&mut self, message: &str) -> io::Result<()> {
        self.line(message)
    }

    /// Prints a warning
    pub fn warn(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "Warning: {}", message)
    }

    /// Prints an error with its chain of causes
    pub fn error(&mut self, err: impl Into<anyhow::Error>) -> io::Result<()> {
        writeln!(self.writer, "Error: {:#}", err.into())
    }

    /// Clears the terminal, if enabled
    pub fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            self.writer
                .queue(Clear(ClearType::All))?
                .queue(MoveTo(0, 0))?;
        }
        Ok(())
    }

    /// Returns the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}
