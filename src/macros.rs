//! Formatted logging macros
//!
//! Template sugar over the level methods: format the arguments with
//! `format!`, then emit the resulting message.
//!
//! # Examples
//!
//! ```
//! use log_router::prelude::*;
//! use log_router::info;
//!
//! let writer = SharedWriter::new(MemorySink::new());
//! let logger = Logger::builder()
//!     .route(Level::Info, writer, RecordFormat::Json)
//!     .build()
//!     .unwrap();
//!
//! let port = 8080;
//! info!(logger, "listening on port {}", port).unwrap();
//! ```

/// Emit a formatted message at the given level.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.emit($level, format!($($arg)+))
    };
}

/// Emit a formatted debug message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Emit a formatted info message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Emit a formatted warn message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

/// Emit a formatted error message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Emit a formatted message through the fatal sequence. Does not return.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal(format!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Level, Logger, RecordFormat, SharedWriter};
    use crate::sinks::MemorySink;

    fn routed_logger() -> (Logger, crate::sinks::MemoryBuffer) {
        let sink = MemorySink::new();
        let buffer = sink.buffer();
        let writer = SharedWriter::new(sink);
        let logger = Logger::builder()
            .route(Level::Debug, writer.clone(), RecordFormat::TagValue)
            .route(Level::Info, writer.clone(), RecordFormat::TagValue)
            .route(Level::Warn, writer.clone(), RecordFormat::TagValue)
            .route(Level::Error, writer, RecordFormat::TagValue)
            .auto_flush(true)
            .build()
            .unwrap();
        (logger, buffer)
    }

    #[test]
    fn test_log_macro_formats_arguments() {
        let (logger, buffer) = routed_logger();
        log!(logger, Level::Info, "value: {}", 42).unwrap();
        assert!(buffer.contents().contains("value: 42"));
    }

    #[test]
    fn test_level_macros() {
        let (logger, buffer) = routed_logger();
        debug!(logger, "debug {}", 1).unwrap();
        info!(logger, "info {}", 2).unwrap();
        warn!(logger, "warn {}", 3).unwrap();
        error!(logger, "error {}", 4).unwrap();

        let lines = buffer.lines();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("level=debug"));
        assert!(lines[3].contains("level=error"));
    }
}
