//! Output writer for console replies

use std::io::{self, Write};

/// Output helper for consistent line-oriented replies
pub struct Output<W: Write> {
    writer: W,
}

impl<W: Write> Output<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Prints a reply or diagnostic line
    pub fn line(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", message)
    }

    /// Prints a blank line
    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.writer)
    }

    /// Prints the prompt without a newline and flushes so it is visible
    pub fn prompt(&mut self, prompt: &str) -> io::Result<()> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Returns the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}
