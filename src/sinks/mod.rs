//! Sink implementations

pub mod console;
pub mod file;
pub mod memory;

pub use console::ConsoleSink;
pub use file::{Compression, FileSink};
pub use memory::{MemoryBuffer, MemorySink};

pub use crate::core::Sink;
