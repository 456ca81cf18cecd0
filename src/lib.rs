//! # Log Router
//!
//! A structured logging router: leveled records fan out to one or more
//! writers, each with its own serialization format.
//!
//! ## Features
//!
//! - **Level Routing**: Each level maps to a writer; several levels can
//!   share one destination
//! - **Independent Formats**: JSON or tag-value output per writer
//! - **Thread Safe**: Per-writer locking keeps concurrent output whole
//! - **Ordered Shutdown**: `fatal` flushes durably before terminating

pub mod app;
pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::app::{application_logger, ApplicationLogConfig};
    pub use crate::core::{
        FieldValue, Level, Logger, LoggerBuilder, Payload, Record, RecordFormat, RecordFormatter,
        Result, Route, RouterError, SharedWriter, Sink, TimestampFormat, WriterGuard,
    };
    pub use crate::sinks::{Compression, ConsoleSink, FileSink, MemoryBuffer, MemorySink};
}

pub use app::{application_logger, ApplicationLogConfig};
pub use core::{
    FieldValue, Level, Logger, LoggerBuilder, Payload, Record, RecordFormat, RecordFormatter,
    Result, Route, RouterError, SharedWriter, Sink, TimestampFormat, WriterGuard,
};
pub use sinks::{Compression, ConsoleSink, FileSink, MemoryBuffer, MemorySink};
