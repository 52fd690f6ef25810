//! Terminal reporting for packaging runs.
//!
//! Color is best effort. Only the final write of a line can fail a call.

use std::io::{self, Write};
use termcolor::{Buffer, BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Writes progress and results, with stage numbering and `--quiet` support.
#[derive(Debug)]
pub struct OutputManager {
    stdout: BufferWriter,
    quiet: bool,
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        Self::new(self.quiet)
    }
}

fn paint(buffer: &mut Buffer, color: Color, bold: bool, text: &str) {
    let _ = buffer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold));
    let _ = write!(buffer, "{}", text);
    let _ = buffer.reset();
}

impl OutputManager {
    /// Creates a manager writing to stdout. `quiet` silences everything but errors.
    pub fn new(quiet: bool) -> Self {
        Self {
            stdout: BufferWriter::stdout(ColorChoice::Auto),
            quiet,
        }
    }

    fn line(&self, marker: &str, color: Color, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut buffer = self.stdout.buffer();
        paint(&mut buffer, color, true, marker);
        writeln!(buffer, " {}", message)?;
        self.stdout.print(&buffer)
    }

    /// `✓ message` in green.
    pub fn success(&self, message: &str) -> io::Result<()> {
        self.line("✓", Color::Green, message)
    }

    /// `⋯ message` in magenta.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        self.line("⋯", Color::Magenta, message)
    }

    /// `[3/8] message`, for pipeline stages.
    pub fn stage(&self, index: usize, total: usize, message: &str) -> io::Result<()> {
        self.line(&format!("[{}/{}]", index, total), Color::Magenta, message)
    }

    /// Bold cyan header.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut buffer = self.stdout.buffer();
        paint(&mut buffer, Color::Cyan, true, &format!("═══ {} ═══", title));
        writeln!(buffer)?;
        self.stdout.print(&buffer)
    }

    /// Four-space indented detail line.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut buffer = self.stdout.buffer();
        writeln!(buffer, "    {}", message)?;
        self.stdout.print(&buffer)
    }

    /// `✗ message` on stderr. Shown even when quiet; falls back to plain
    /// `eprintln!` if the colored write fails.
    pub fn error(&self, message: &str) {
        let stderr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = stderr.buffer();
        paint(&mut buffer, Color::Red, true, "✗");
        let printed = writeln!(buffer, " {}", message).and_then(|()| stderr.print(&buffer));
        if printed.is_err() {
            eprintln!("✗ {}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_output_skips_progress() {
        let output = OutputManager::new(true);
        assert!(output.stage(1, 8, "Resetting workspace").is_ok());
        assert!(output.success("done").is_ok());
        assert!(output.section("Packaging").is_ok());
        assert!(output.indent("detail").is_ok());
    }
}
