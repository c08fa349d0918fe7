//! JSON Lines (JSONL) output writer.
//!
//! One record object per line. Embedded newlines in messages are escaped by
//! JSON string encoding, so every record occupies exactly one line.

use std::fs::File;
use std::io::{BufWriter, Write};

use super::RecordWriter;
use crate::Record;
use crate::core::models::OutputConfig;
use crate::error::Result;

/// Incremental JSONL writer.
pub struct JsonlRecordWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonlRecordWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordWriter for JsonlRecordWriter<W> {
    fn write_record(&mut self, record: &Record) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes records to JSONL (JSON Lines) format.
///
/// # Format
/// ```jsonl
/// {"datetime":"2023-01-02 09:00:00","name":"Alice","message":"hello","message_type":"message"}
/// {"datetime":"2023-01-02 09:01:00","name":"N/A","message":"You left","message_type":"you_left"}
/// ```
pub fn write_jsonl(records: &[Record], output_path: &str, _config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = JsonlRecordWriter::new(BufWriter::new(file));
    for record in records {
        writer.write_record(record)?;
    }
    writer.finish()
}

/// Converts records to a JSONL string.
///
/// Same format as [`write_jsonl`], but returns a String instead of writing to file.
pub fn to_jsonl(records: &[Record], _config: &OutputConfig) -> Result<String> {
    let mut writer = JsonlRecordWriter::new(Vec::new());
    for record in records {
        writer.write_record(record)?;
    }
    Ok(String::from_utf8(writer.into_inner())?)
}
