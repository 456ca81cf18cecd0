//! Application logger construction
//!
//! Turns destination strings into a routing table that behaves the way an
//! application logger is expected to: errors to one destination, info to
//! another (or the same one, sharing a single writer), verbose mode
//! folding warn into the error route and debug into the info route.

use crate::core::{Level, Logger, RecordFormat, Result, RouterError, SharedWriter};
use crate::sinks::{Compression, ConsoleSink, FileSink};

/// Destinations and formats for an application logger.
///
/// Destinations are `"stdout"` (or `"-"`), `"stderr"`, or a file path.
/// An empty, `"null"`, or `"/dev/null"` info destination drops info
/// output entirely.
#[derive(Debug, Clone)]
pub struct ApplicationLogConfig {
    pub error_destination: String,
    pub error_format: RecordFormat,
    pub error_compression: Compression,
    pub info_destination: String,
    pub info_format: RecordFormat,
    pub info_compression: Compression,
    /// Route warn alongside error and debug alongside info
    pub verbose: bool,
}

impl Default for ApplicationLogConfig {
    fn default() -> Self {
        Self {
            error_destination: "stderr".to_string(),
            error_format: RecordFormat::TagValue,
            error_compression: Compression::None,
            info_destination: "stdout".to_string(),
            info_format: RecordFormat::TagValue,
            info_compression: Compression::None,
            verbose: false,
        }
    }
}

/// Build an auto-flushing logger from the config.
///
/// When the info and error destinations match, both levels share a single
/// writer; their formats and compression must then match too.
pub fn application_logger(config: &ApplicationLogConfig) -> Result<Logger> {
    let error_writer = open_destination(&config.error_destination, config.error_compression)?;

    let mut builder = Logger::builder().auto_flush(true).route(
        Level::Error,
        error_writer.clone(),
        config.error_format.clone(),
    );
    if config.verbose {
        builder = builder.route(
            Level::Warn,
            error_writer.clone(),
            config.error_format.clone(),
        );
    }

    if !drops_output(&config.info_destination) {
        if config.info_destination == config.error_destination {
            if config.info_format != config.error_format {
                return Err(RouterError::config(format!(
                    "info format ({}) and error format ({}) must match when they share a destination",
                    config.info_format, config.error_format
                )));
            }
            if config.info_compression != config.error_compression {
                return Err(RouterError::config(
                    "info and error compression must match when they share a destination",
                ));
            }
            builder = builder.route(
                Level::Info,
                error_writer.clone(),
                config.error_format.clone(),
            );
            if config.verbose {
                builder = builder.route(Level::Debug, error_writer, config.error_format.clone());
            }
        } else {
            let info_writer = open_destination(&config.info_destination, config.info_compression)?;
            builder = builder.route(
                Level::Info,
                info_writer.clone(),
                config.info_format.clone(),
            );
            if config.verbose {
                builder = builder.route(Level::Debug, info_writer, config.info_format.clone());
            }
        }
    }

    builder.build()
}

fn open_destination(destination: &str, compression: Compression) -> Result<SharedWriter> {
    match destination {
        "stdout" | "-" => Ok(SharedWriter::new(ConsoleSink::stdout())),
        "stderr" => Ok(SharedWriter::new(ConsoleSink::stderr())),
        path => Ok(SharedWriter::new(FileSink::with_compression(
            path,
            compression,
        )?)),
    }
}

fn drops_output(destination: &str) -> bool {
    destination.is_empty() || destination == "null" || destination == "/dev/null"
}
