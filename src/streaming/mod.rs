//! Streaming transcript parsing for large exports.
//!
//! [`ChatParser::stream`] reads the file line by line through a buffered
//! reader instead of loading it first. Segmentation and classification are
//! the same as for [`ChatParser::parse`]; only the line source differs.
//!
//! # Example
//!
//! ```rust,no_run
//! use wachat::parser::ChatParser;
//!
//! let parser = ChatParser::new();
//! let mut stream = parser.stream("WhatsApp Chat with Family.txt".as_ref())?;
//!
//! while let Some(record) = stream.next() {
//!     let record = record?;
//!     println!("{} {}: {}", record.datetime_string(), record.name, record.message);
//!
//!     if let Some(pct) = stream.progress() {
//!         eprintln!("\r{:.1}%", pct);
//!     }
//! }
//! # Ok::<(), wachat::WachatError>(())
//! ```
//!
//! # Memory Usage
//!
//! Peak memory is one record body plus the read buffer
//! ([`ParserConfig::buffer_size`](crate::config::ParserConfig)).

mod lines;

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub use lines::LineReader;

use crate::Record;
use crate::error::Result;
use crate::parser::{ChatParser, Records};
use crate::parsing::Segmenter;

/// Record iterator over a file, with progress tracking.
pub struct RecordStream {
    records: Records<LineReader<BufReader<File>>>,
    file_size: u64,
}

impl RecordStream {
    /// Returns approximate progress as a percentage (0.0 to 100.0).
    ///
    /// Returns `None` for empty files.
    pub fn progress(&self) -> Option<f64> {
        if self.file_size == 0 {
            return None;
        }
        Some((self.bytes_processed() as f64 / self.file_size as f64) * 100.0)
    }

    /// Returns the number of bytes processed so far.
    pub fn bytes_processed(&self) -> u64 {
        self.records.source().bytes_read()
    }

    /// Returns the total file size in bytes.
    pub fn total_bytes(&self) -> u64 {
        self.file_size
    }

    /// Number of records produced so far.
    pub fn records_emitted(&self) -> usize {
        self.records.records_emitted()
    }

    /// Number of unclassifiable records seen so far.
    pub fn diagnostics_emitted(&self) -> usize {
        self.records.diagnostics_emitted()
    }
}

impl fmt::Debug for RecordStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStream")
            .field("bytes_processed", &self.bytes_processed())
            .field("total_bytes", &self.file_size)
            .field("records_emitted", &self.records_emitted())
            .finish_non_exhaustive()
    }
}

impl Iterator for RecordStream {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next()
    }
}

impl ChatParser {
    /// Streams records from a transcript file.
    ///
    /// # Errors
    ///
    /// Returns [`WachatError::Io`](crate::WachatError::Io) if the file cannot
    /// be opened. Read errors and invalid timestamps are yielded by the
    /// iterator and end it.
    pub fn stream(&self, path: &Path) -> Result<RecordStream> {
        let file = File::open(path)?;
        let file_size = file.metadata()?.len();

        let reader = BufReader::with_capacity(self.config().buffer_size, file);
        let segmenter = Segmenter::new(LineReader::new(reader));

        Ok(RecordStream {
            records: self.records_from(segmenter, Some(path.display().to_string())),
            file_size,
        })
    }

    /// Streams records (convenience method accepting &str path).
    pub fn stream_file(&self, path: &str) -> Result<RecordStream> {
        self.stream(Path::new(path))
    }
}
