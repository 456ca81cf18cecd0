//! File sink
//!
//! Buffered append-mode file writer, with optional gzip compression for
//! destinations named `*.gz` or configured explicitly. Compressed sinks
//! must be closed so the gzip stream is finished; an unfinished stream is
//! not a valid gzip file.

use crate::core::{Result, RouterError, Sink};
use flate2::write::GzEncoder;
use flate2::Compression as GzLevel;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Compression applied to a file destination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    #[default]
    None,
    Gzip,
}

enum FileStream {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl FileStream {
    fn write_all(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        match self {
            FileStream::Plain(w) => w.write_all(bytes),
            FileStream::Gzip(w) => w.write_all(bytes),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            FileStream::Plain(w) => w.flush(),
            FileStream::Gzip(w) => w.flush(),
        }
    }

    fn finish(self) -> std::io::Result<()> {
        match self {
            FileStream::Plain(mut w) => w.flush(),
            FileStream::Gzip(w) => w.finish()?.flush(),
        }
    }
}

pub struct FileSink {
    stream: Option<FileStream>,
    name: String,
}

impl FileSink {
    /// Open an uncompressed sink in append mode, creating the file if
    /// needed
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            stream: Some(FileStream::Plain(BufWriter::new(file))),
            name: path.display().to_string(),
        })
    }

    /// Open a sink with the given compression. Gzip destinations are
    /// truncated; appending to an existing gzip stream would corrupt it.
    pub fn with_compression(path: impl AsRef<Path>, compression: Compression) -> Result<Self> {
        match compression {
            Compression::None => Self::new(path),
            Compression::Gzip => {
                let path = path.as_ref();
                let file = File::create(path)?;
                let encoder = GzEncoder::new(BufWriter::new(file), GzLevel::default());
                Ok(Self {
                    stream: Some(FileStream::Gzip(encoder)),
                    name: path.display().to_string(),
                })
            }
        }
    }

    fn stream(&mut self) -> Result<&mut FileStream> {
        let name = &self.name;
        self.stream
            .as_mut()
            .ok_or_else(|| RouterError::closed(name.clone()))
    }
}

impl Sink for FileSink {
    fn write_line(&mut self, line: &str) -> Result<usize> {
        let stream = self.stream()?;
        stream.write_all(line.as_bytes())?;
        stream.write_all(b"\n")?;
        Ok(line.len() + 1)
    }

    fn flush(&mut self) -> Result<()> {
        self.stream()?.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        match self.stream.take() {
            Some(stream) => {
                stream.finish()?;
                Ok(())
            }
            None => Err(RouterError::closed(self.name.clone())),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.finish();
        }
    }
}
