//! JSON output writer.

use std::fs::File;
use std::io::{BufWriter, Write};

use super::RecordWriter;
use crate::Record;
use crate::core::models::OutputConfig;
use crate::error::Result;

/// Incremental writer producing a JSON array, one record object per line.
///
/// # Format
/// ```json
/// [
///   {"datetime":"2023-01-02 09:00:00","name":"Alice","message":"hello","message_type":"message"},
///   {"datetime":"2023-01-02 09:01:00","name":"Bob","message":"Bob left","message_type":"left"}
/// ]
/// ```
pub struct JsonRecordWriter<W: Write> {
    writer: W,
    count: usize,
}

impl<W: Write> JsonRecordWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, count: 0 }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordWriter for JsonRecordWriter<W> {
    fn write_record(&mut self, record: &Record) -> Result<()> {
        let separator: &[u8] = if self.count == 0 { b"[\n  " } else { b",\n  " };
        self.writer.write_all(separator)?;
        serde_json::to_writer(&mut self.writer, record)?;
        self.count += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let closing: &[u8] = if self.count == 0 { b"[]\n" } else { b"\n]\n" };
        self.writer.write_all(closing)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes records to a JSON file as an array.
pub fn write_json(records: &[Record], output_path: &str, config: &OutputConfig) -> Result<()> {
    let json = to_json(records, config)?;
    let mut file = BufWriter::new(File::create(output_path)?);
    file.write_all(json.as_bytes())?;
    file.flush()?;
    Ok(())
}

/// Converts records to a JSON array string.
///
/// Same format as [`write_json`], but returns a String instead of writing to file.
pub fn to_json(records: &[Record], _config: &OutputConfig) -> Result<String> {
    let mut writer = JsonRecordWriter::new(Vec::new());
    for record in records {
        writer.write_record(record)?;
    }
    writer.finish()?;
    Ok(String::from_utf8(writer.into_inner())?)
}
