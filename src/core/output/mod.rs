//! Output format writers.
//!
//! This module provides writers for different output formats:
//! - [`write_csv`] / [`to_csv`] - CSV with `datetime,name,message,message_type` columns - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of records - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines (one record per line) - requires `json-output` feature
//!
//! Each format also has an incremental [`RecordWriter`] that accepts one
//! record at a time, so a parser's lazy output can be written without
//! collecting it first.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> wachat::Result<()> {
//! use wachat::core::output::{write_csv, write_jsonl, to_csv};
//! use wachat::core::models::OutputConfig;
//! use wachat::parser::ChatParser;
//!
//! let records = ChatParser::new().parse_file("chat.txt")?;
//!
//! write_csv(&records, "output.csv", &OutputConfig::new())?;
//! write_jsonl(&records, "output.jsonl", &OutputConfig::new())?;
//!
//! let one_row_per_line = to_csv(&records, &OutputConfig::new().with_escaped_newlines())?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{CSV_HEADER, CsvRecordWriter, escape_newlines, to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{JsonRecordWriter, to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{JsonlRecordWriter, to_jsonl, write_jsonl};

use crate::Record;
use crate::error::Result;

/// Incremental record sink.
///
/// Call [`write_record`](RecordWriter::write_record) once per record, then
/// [`finish`](RecordWriter::finish) exactly once to close the document and
/// flush the underlying writer.
pub trait RecordWriter {
    fn write_record(&mut self, record: &Record) -> Result<()>;

    fn finish(&mut self) -> Result<()>;
}
