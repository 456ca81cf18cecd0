//! Writer capability: lockable, shareable byte sinks
//!
//! A `Sink` is the unguarded byte-sink primitive (write a line, flush,
//! close). `SharedWriter` wraps it in a shared mutex handle; this is what
//! routes hold, and what gives the router its per-writer mutual exclusion.
//! Lines written through the guarded path appear in the sink in lock
//! acquisition order.

use super::error::Result;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// An unguarded byte sink. Implementations append exactly one line per
/// `write_line` call, adding the trailing newline themselves.
pub trait Sink: Send {
    /// Append one line to the sink, returning the number of bytes written
    fn write_line(&mut self, line: &str) -> Result<usize>;

    /// Flush buffered bytes to the underlying destination
    fn flush(&mut self) -> Result<()>;

    /// Flush and release the underlying destination. Writing after close
    /// is an error.
    fn close(&mut self) -> Result<()>;

    fn name(&self) -> &str;
}

/// Guard over a locked sink, for call paths that hold the lock across
/// several operations (close and fatal pre-acquire every writer's lock
/// before touching any of them).
pub type WriterGuard<'a> = MutexGuard<'a, Box<dyn Sink>>;

/// A shared, lockable handle to a sink.
///
/// Cloning is cheap and aliases the same sink; two routes holding clones
/// of one `SharedWriter` write to the same destination. All operations
/// that can race with other callers on the same writer must go through
/// the `_safe` variants or an explicit `lock`.
#[derive(Clone)]
pub struct SharedWriter {
    inner: Arc<Mutex<Box<dyn Sink>>>,
}

impl SharedWriter {
    pub fn new(sink: impl Sink + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(sink))),
        }
    }

    /// Lock the writer, returning a guard for unguarded operations
    pub fn lock(&self) -> WriterGuard<'_> {
        self.inner.lock()
    }

    /// Lock, write one line, unlock
    pub fn write_line_safe(&self, line: &str) -> Result<usize> {
        self.inner.lock().write_line(line)
    }

    /// Lock, flush, unlock
    pub fn flush_safe(&self) -> Result<()> {
        self.inner.lock().flush()
    }

    /// Whether two handles alias the same underlying sink
    pub fn same_sink(&self, other: &SharedWriter) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Name of the underlying sink
    pub fn name(&self) -> String {
        self.inner.lock().name().to_string()
    }
}
