//! In-memory sink
//!
//! Captures written lines in a buffer that stays readable through a
//! `MemoryBuffer` handle after the sink has been handed to a writer, and
//! even after the sink is closed. Lines become visible in the handle only
//! on flush, so flush semantics are observable.

use crate::core::{Result, RouterError, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

/// Read handle over a memory sink's flushed bytes
#[derive(Clone)]
pub struct MemoryBuffer {
    flushed: Arc<Mutex<Vec<u8>>>,
}

impl MemoryBuffer {
    /// Flushed contents as a string
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.flushed.lock()).into_owned()
    }

    /// Flushed contents split into lines
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.flushed.lock().is_empty()
    }
}

pub struct MemorySink {
    pending: Vec<u8>,
    flushed: Arc<Mutex<Vec<u8>>>,
    closed: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            flushed: Arc::new(Mutex::new(Vec::new())),
            closed: false,
        }
    }

    /// Handle to the flushed bytes; keep it before handing the sink off
    pub fn buffer(&self) -> MemoryBuffer {
        MemoryBuffer {
            flushed: Arc::clone(&self.flushed),
        }
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for MemorySink {
    fn write_line(&mut self, line: &str) -> Result<usize> {
        if self.closed {
            return Err(RouterError::closed(self.name()));
        }
        self.pending.extend_from_slice(line.as_bytes());
        self.pending.push(b'\n');
        Ok(line.len() + 1)
    }

    fn flush(&mut self) -> Result<()> {
        if !self.pending.is_empty() {
            self.flushed.lock().append(&mut self.pending);
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.flush()?;
        self.closed = true;
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
