//! Console sink

use crate::core::{Result, Sink};
use std::io::Write;

enum Stream {
    Stdout,
    Stderr,
}

/// Line writer over stdout or stderr. Closing only flushes; the standard
/// streams themselves stay open for the rest of the process.
pub struct ConsoleSink {
    stream: Stream,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self {
            stream: Stream::Stdout,
        }
    }

    pub fn stderr() -> Self {
        Self {
            stream: Stream::Stderr,
        }
    }
}

impl Sink for ConsoleSink {
    fn write_line(&mut self, line: &str) -> Result<usize> {
        match self.stream {
            Stream::Stdout => writeln!(std::io::stdout(), "{}", line)?,
            Stream::Stderr => writeln!(std::io::stderr(), "{}", line)?,
        }
        Ok(line.len() + 1)
    }

    fn flush(&mut self) -> Result<()> {
        match self.stream {
            Stream::Stdout => std::io::stdout().flush()?,
            Stream::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.flush()
    }

    fn name(&self) -> &str {
        match self.stream {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        }
    }
}
