//! Level router and dispatch
//!
//! `Logger` owns the mapping from level to a writer/format pair and
//! dispatches each record under the writer's lock. The routing table is
//! fixed at construction; after `close` or `fatal` the writers are closed
//! and further emits fail.

use super::{
    error::{Result, RouterError},
    format::RecordFormat,
    level::Level,
    payload::Payload,
    record::RecordFormatter,
    timestamp::TimestampFormat,
    writer::{SharedWriter, WriterGuard},
};
use crossbeam_channel::Receiver;
use std::collections::HashMap;
use std::process;
use std::sync::Arc;
use std::thread;

/// A destination: a shared writer and the format records take on the way
/// in. Two levels routed to clones of one `SharedWriter` share the
/// destination; the builder guarantees they also share the format.
#[derive(Clone)]
pub struct Route {
    writer: SharedWriter,
    format: RecordFormat,
}

pub struct Logger {
    routes: HashMap<Level, Route>,
    /// Distinct writers in construction order; the fixed lock order for
    /// close and fatal
    writers: Vec<SharedWriter>,
    formatter: RecordFormatter,
    auto_flush: bool,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("levels", &self.routes.len())
            .field("writers", &self.writers.len())
            .field("auto_flush", &self.auto_flush)
            .finish()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Dispatch a payload at the given level.
    ///
    /// Fails with `UnknownLevel` when no route is configured for the
    /// level. A record that serializes to an empty line is suppressed
    /// without error. With auto-flush enabled, the written writer is
    /// flushed before this returns.
    pub fn emit(&self, level: Level, payload: impl Into<Payload>) -> Result<()> {
        let payload = payload.into();
        let route = self
            .routes
            .get(&level)
            .ok_or_else(|| RouterError::unknown_level(level))?;

        let line = self.render(level, &payload, &route.format)?;
        if !line.is_empty() {
            route
                .writer
                .write_line_safe(&line)
                .map_err(|err| RouterError::write(level, err))?;
        }
        if self.auto_flush {
            route
                .writer
                .flush_safe()
                .map_err(|err| RouterError::flush("after writing line", err))?;
        }
        Ok(())
    }

    pub fn debug(&self, payload: impl Into<Payload>) -> Result<()> {
        self.emit(Level::Debug, payload)
    }

    pub fn info(&self, payload: impl Into<Payload>) -> Result<()> {
        self.emit(Level::Info, payload)
    }

    pub fn warn(&self, payload: impl Into<Payload>) -> Result<()> {
        self.emit(Level::Warn, payload)
    }

    pub fn error(&self, payload: impl Into<Payload>) -> Result<()> {
        self.emit(Level::Error, payload)
    }

    /// Flush every writer under its lock.
    ///
    /// Every writer is attempted even when one fails; the first error is
    /// returned.
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for writer in &self.writers {
            if let Err(err) = writer.flush_safe() {
                first_error.get_or_insert(RouterError::flush(writer.name(), err));
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Lock every writer in construction order, flush all, close all,
    /// then release all. The phases run across the whole writer set, so
    /// no writer is closed while another lock holder is mid-flush.
    /// Secondary errors are ignored; the writers are unusable afterwards.
    pub fn close(&self) {
        let mut guards: Vec<WriterGuard<'_>> = self.writers.iter().map(|w| w.lock()).collect();
        for guard in guards.iter_mut() {
            let _ = guard.flush();
        }
        for guard in guards.iter_mut() {
            let _ = guard.close();
        }
    }

    /// Write the payload at level `fatal` through the `error` route,
    /// flush and close every writer, and terminate the process with a
    /// non-zero status.
    ///
    /// The full sequence: lock all writers, flush all, write the fatal
    /// record to the writer mapped for `error` (the routing table is not
    /// consulted for a `fatal` entry), flush all again, close all, unlock
    /// all, exit. The fatal record is durably flushed before termination.
    pub fn fatal(&self, payload: impl Into<Payload>) -> ! {
        self.fatal_shutdown(&payload.into());
        process::exit(1);
    }

    /// Everything `fatal` does short of terminating the process.
    /// Errors are ignored throughout; there is no caller left to see them.
    fn fatal_shutdown(&self, payload: &Payload) {
        let mut guards: Vec<WriterGuard<'_>> = self.writers.iter().map(|w| w.lock()).collect();
        for guard in guards.iter_mut() {
            let _ = guard.flush();
        }
        if let Some(route) = self.routes.get(&Level::Error) {
            // the writer is already locked; write through its guard
            let position = self
                .writers
                .iter()
                .position(|w| w.same_sink(&route.writer));
            if let (Some(position), Ok(line)) =
                (position, self.render(Level::Fatal, payload, &route.format))
            {
                if !line.is_empty() {
                    let _ = guards[position].write_line(&line);
                }
            }
        }
        for guard in guards.iter_mut() {
            let _ = guard.flush();
        }
        for guard in guards.iter_mut() {
            let _ = guard.close();
        }
    }

    /// Consume payloads from a channel on a background thread, writing
    /// each at `info` and flushing after every message. Failures are
    /// forwarded to the `error` route. The returned handle resolves when
    /// the channel is closed and drained.
    ///
    /// The handle moves into the consumer thread; clone the `Arc` to
    /// keep logging from the caller.
    pub fn listen_info(self: Arc<Self>, messages: Receiver<Payload>) -> thread::JoinHandle<()> {
        thread::spawn(move || {
            for message in messages {
                if let Err(err) = self.emit(Level::Info, message) {
                    let _ = self.emit(Level::Error, Payload::fault(&err));
                }
                let _ = self.flush();
            }
        })
    }

    /// Consume payloads from a channel on a background thread, writing
    /// each at `error` and flushing after every message. Failures are
    /// dropped; this is already the error route.
    pub fn listen_error(self: Arc<Self>, messages: Receiver<Payload>) -> thread::JoinHandle<()> {
        thread::spawn(move || {
            for message in messages {
                let _ = self.emit(Level::Error, message);
                let _ = self.flush();
            }
        })
    }

    /// Wait for one payload on a channel, then run the fatal sequence,
    /// terminating the process. The handle resolves only if the channel
    /// closes without a message.
    pub fn listen_fatal(self: Arc<Self>, messages: Receiver<Payload>) -> thread::JoinHandle<()> {
        thread::spawn(move || {
            if let Ok(message) = messages.recv() {
                self.fatal(message);
            }
        })
    }

    fn render(&self, level: Level, payload: &Payload, format: &RecordFormat) -> Result<String> {
        let record = self.formatter.record(level, payload);
        format
            .serialize(&record)
            .map_err(|err| RouterError::format(level, format.as_str(), err))
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// # Example
/// ```
/// use log_router::prelude::*;
///
/// let writer = SharedWriter::new(MemorySink::new());
/// let logger = Logger::builder()
///     .route(Level::Info, writer.clone(), RecordFormat::Json)
///     .route(Level::Error, writer, RecordFormat::Json)
///     .auto_flush(true)
///     .build()
///     .unwrap();
/// logger.info("ready").unwrap();
/// ```
pub struct LoggerBuilder {
    routes: Vec<(Level, SharedWriter, RecordFormat)>,
    formatter: RecordFormatter,
    auto_flush: bool,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            formatter: RecordFormatter::default(),
            auto_flush: false,
        }
    }

    /// Route a level to a writer with the given format. Pass clones of
    /// one `SharedWriter` to alias several levels onto one destination.
    #[must_use = "builder methods return a new value"]
    pub fn route(mut self, level: Level, writer: SharedWriter, format: RecordFormat) -> Self {
        self.routes.push((level, writer, format));
        self
    }

    /// Key for the level field; empty suppresses it
    #[must_use = "builder methods return a new value"]
    pub fn level_field(mut self, name: impl Into<String>) -> Self {
        self.formatter.level_field = name.into();
        self
    }

    /// Key for the timestamp field; empty suppresses it
    #[must_use = "builder methods return a new value"]
    pub fn timestamp_field(mut self, name: impl Into<String>) -> Self {
        self.formatter.timestamp_field = name.into();
        self
    }

    /// Format for the timestamp field value
    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.formatter.timestamp_format = format;
        self
    }

    /// Key for the message field; empty suppresses it
    #[must_use = "builder methods return a new value"]
    pub fn message_field(mut self, name: impl Into<String>) -> Self {
        self.formatter.message_field = name.into();
        self
    }

    /// Flush the written writer after every message
    #[must_use = "builder methods return a new value"]
    pub fn auto_flush(mut self, enabled: bool) -> Self {
        self.auto_flush = enabled;
        self
    }

    /// Build the Logger.
    ///
    /// Fails when two levels alias one writer with different formats; the
    /// router itself assumes this was enforced and does not re-check.
    pub fn build(self) -> Result<Logger> {
        let mut routes: HashMap<Level, Route> = HashMap::new();
        let mut writers: Vec<SharedWriter> = Vec::new();

        for (level, writer, format) in self.routes {
            for (other_level, other) in &routes {
                if other.writer.same_sink(&writer) && other.format != format {
                    return Err(RouterError::config(format!(
                        "levels {} and {} share a writer but use formats {} and {}",
                        other_level, level, other.format, format
                    )));
                }
            }
            if !writers.iter().any(|w| w.same_sink(&writer)) {
                writers.push(writer.clone());
            }
            routes.insert(level, Route { writer, format });
        }

        Ok(Logger {
            routes,
            writers,
            formatter: self.formatter,
            auto_flush: self.auto_flush,
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Sink;
    use crate::sinks::{MemoryBuffer, MemorySink};

    fn memory_logger(auto_flush: bool) -> (Logger, MemoryBuffer) {
        let sink = MemorySink::new();
        let buffer = sink.buffer();
        let writer = SharedWriter::new(sink);
        let logger = Logger::builder()
            .route(Level::Info, writer.clone(), RecordFormat::TagValue)
            .route(Level::Error, writer, RecordFormat::TagValue)
            .auto_flush(auto_flush)
            .build()
            .unwrap();
        (logger, buffer)
    }

    #[test]
    fn test_emit_unknown_level() {
        let (logger, buffer) = memory_logger(true);
        let err = logger.debug("not routed").unwrap_err();
        assert!(matches!(err, RouterError::UnknownLevel { ref level } if level == "debug"));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_emit_writes_one_line() {
        let (logger, buffer) = memory_logger(true);
        logger.info("hello").unwrap();

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("level=info"));
        assert!(lines[0].contains("msg=hello"));
        assert!(lines[0].contains("ts="));
    }

    #[test]
    fn test_auto_flush_disabled_requires_explicit_flush() {
        let (logger, buffer) = memory_logger(false);
        logger.info("buffered").unwrap();
        assert!(buffer.is_empty());

        logger.flush().unwrap();
        assert_eq!(buffer.lines().len(), 1);
    }

    #[test]
    fn test_aliased_levels_share_destination_in_order() {
        let (logger, buffer) = memory_logger(true);
        logger.info("first").unwrap();
        logger.error("second").unwrap();
        logger.info("third").unwrap();

        let lines = buffer.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("level=info"));
        assert!(lines[1].contains("level=error"));
        assert!(lines[2].contains("level=info"));
    }

    #[test]
    fn test_suppressed_record_writes_nothing() {
        let sink = MemorySink::new();
        let buffer = sink.buffer();
        let logger = Logger::builder()
            .route(Level::Info, SharedWriter::new(sink), RecordFormat::TagValue)
            .level_field("")
            .timestamp_field("")
            .message_field("")
            .auto_flush(true)
            .build()
            .unwrap();

        logger.info("invisible").unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_builder_rejects_mismatched_formats_on_shared_writer() {
        let writer = SharedWriter::new(MemorySink::new());
        let err = Logger::builder()
            .route(Level::Info, writer.clone(), RecordFormat::Json)
            .route(Level::Error, writer, RecordFormat::TagValue)
            .build()
            .unwrap_err();
        assert!(matches!(err, RouterError::Config { .. }));
    }

    #[test]
    fn test_builder_allows_same_format_on_shared_writer() {
        let writer = SharedWriter::new(MemorySink::new());
        assert!(Logger::builder()
            .route(Level::Info, writer.clone(), RecordFormat::Json)
            .route(Level::Error, writer, RecordFormat::Json)
            .build()
            .is_ok());
    }

    #[test]
    fn test_close_then_emit_fails() {
        let (logger, buffer) = memory_logger(true);
        logger.info("before close").unwrap();
        logger.close();

        assert_eq!(buffer.lines().len(), 1);
        let err = logger.info("after close").unwrap_err();
        assert!(matches!(err, RouterError::Write { .. }));
    }

    #[test]
    fn test_fatal_sequence_writes_to_error_route_before_close() {
        let error_sink = MemorySink::new();
        let error_buffer = error_sink.buffer();
        let info_sink = MemorySink::new();
        let info_buffer = info_sink.buffer();

        let logger = Logger::builder()
            .route(Level::Error, SharedWriter::new(error_sink), RecordFormat::TagValue)
            .route(Level::Info, SharedWriter::new(info_sink), RecordFormat::TagValue)
            .build()
            .unwrap();

        logger.info("pending info").unwrap();
        logger.fatal_shutdown(&Payload::from("boom"));

        // the fatal record reached the error writer, stamped fatal
        let error_lines = error_buffer.lines();
        assert_eq!(error_lines.len(), 1);
        assert!(error_lines[0].contains("level=fatal"));
        assert!(error_lines[0].contains("msg=boom"));

        // pending output on other writers was flushed before closing
        assert_eq!(info_buffer.lines().len(), 1);

        // every writer is closed afterwards
        assert!(logger.info("after fatal").is_err());
        assert!(logger.error("after fatal").is_err());
    }

    #[test]
    fn test_fatal_without_error_route_still_flushes_and_closes() {
        let sink = MemorySink::new();
        let buffer = sink.buffer();
        let logger = Logger::builder()
            .route(Level::Info, SharedWriter::new(sink), RecordFormat::TagValue)
            .build()
            .unwrap();

        logger.info("pending").unwrap();
        logger.fatal_shutdown(&Payload::from("boom"));

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(!lines[0].contains("fatal"));
        assert!(logger.info("after").is_err());
    }

    struct FlushFailSink {
        inner: MemorySink,
    }

    impl Sink for FlushFailSink {
        fn write_line(&mut self, line: &str) -> Result<usize> {
            self.inner.write_line(line)
        }

        fn flush(&mut self) -> Result<()> {
            Err(RouterError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "flush refused",
            )))
        }

        fn close(&mut self) -> Result<()> {
            self.inner.close()
        }

        fn name(&self) -> &str {
            "flush-fail"
        }
    }

    #[test]
    fn test_flush_attempts_every_writer_and_returns_first_error() {
        let good_sink = MemorySink::new();
        let good_buffer = good_sink.buffer();

        let logger = Logger::builder()
            .route(
                Level::Error,
                SharedWriter::new(FlushFailSink {
                    inner: MemorySink::new(),
                }),
                RecordFormat::TagValue,
            )
            .route(Level::Info, SharedWriter::new(good_sink), RecordFormat::TagValue)
            .build()
            .unwrap();

        logger.info("must still flush").unwrap();

        let err = logger.flush().unwrap_err();
        assert!(matches!(err, RouterError::Flush { .. }));

        // the healthy writer was flushed despite the earlier failure
        assert_eq!(good_buffer.lines().len(), 1);
    }
}
