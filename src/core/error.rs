//! Error types for the routing core

use super::level::Level;

pub type Result<T> = std::result::Result<T, RouterError>;

#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// Level has no configured route; a caller configuration error
    #[error("unknown level {level}")]
    UnknownLevel { level: String },

    /// The record formatter or serializer could not produce bytes
    #[error("error formatting record at level {level} using format {format}: {source}")]
    Format {
        level: String,
        format: String,
        #[source]
        source: Box<RouterError>,
    },

    /// The underlying writer failed
    #[error("error writing {level} message: {source}")]
    Write {
        level: String,
        #[source]
        source: Box<RouterError>,
    },

    /// A flush operation failed
    #[error("error flushing {context}: {source}")]
    Flush {
        context: String,
        #[source]
        source: Box<RouterError>,
    },

    /// Unsupported serialization format identifier
    #[error("unsupported format '{0}'")]
    UnsupportedFormat(String),

    /// Writer used after being closed
    #[error("writer {name} is closed")]
    Closed { name: String },

    /// Construction-time validation failure
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RouterError {
    /// Create an unknown level error
    pub fn unknown_level(level: impl ToString) -> Self {
        RouterError::UnknownLevel {
            level: level.to_string(),
        }
    }

    /// Wrap a serialization failure with level and format context
    pub fn format(level: Level, format: impl Into<String>, source: RouterError) -> Self {
        RouterError::Format {
            level: level.as_str().to_string(),
            format: format.into(),
            source: Box::new(source),
        }
    }

    /// Wrap a write failure with level context
    pub fn write(level: Level, source: RouterError) -> Self {
        RouterError::Write {
            level: level.as_str().to_string(),
            source: Box::new(source),
        }
    }

    /// Wrap a flush failure with context
    pub fn flush(context: impl Into<String>, source: RouterError) -> Self {
        RouterError::Flush {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Create a closed writer error
    pub fn closed(name: impl Into<String>) -> Self {
        RouterError::Closed { name: name.into() }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        RouterError::Config {
            message: message.into(),
        }
    }
}
