//! Core routing components

pub mod error;
pub mod format;
pub mod level;
pub mod logger;
pub mod payload;
pub mod record;
pub mod timestamp;
pub mod writer;

pub use error::{Result, RouterError};
pub use format::{Record, RecordFormat};
pub use level::Level;
pub use logger::{Logger, LoggerBuilder, Route};
pub use payload::{FieldValue, Payload};
pub use record::RecordFormatter;
pub use timestamp::TimestampFormat;
pub use writer::{SharedWriter, Sink, WriterGuard};
