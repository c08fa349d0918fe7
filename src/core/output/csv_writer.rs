//! CSV output writer.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use super::RecordWriter;
use crate::Record;
use crate::core::models::OutputConfig;
use crate::error::Result;

/// Column names, in output order.
pub const CSV_HEADER: [&str; 4] = ["datetime", "name", "message", "message_type"];

/// Replaces `\` with `\\`, newline with `\n` and carriage return with `\r`.
///
/// Borrows when the field contains none of them.
pub fn escape_newlines(field: &str) -> Cow<'_, str> {
    if !field.contains(['\\', '\n', '\r']) {
        return Cow::Borrowed(field);
    }

    let mut escaped = String::with_capacity(field.len() + 8);
    for c in field.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Incremental CSV writer.
///
/// Fields are quoted as needed (RFC 4180), so by default a multi-line
/// message is written as one quoted field spanning several physical lines.
pub struct CsvRecordWriter<W: Write> {
    writer: csv::Writer<W>,
    escape_newlines: bool,
}

impl<W: Write> CsvRecordWriter<W> {
    /// Creates the writer and emits the header row if configured.
    pub fn new(inner: W, config: &OutputConfig) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(config.delimiter)
            .from_writer(inner);

        if config.include_header {
            writer.write_record(CSV_HEADER)?;
        }

        Ok(Self {
            writer,
            escape_newlines: config.escape_newlines,
        })
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| io::Error::new(e.error().kind(), e.error().to_string()).into())
    }
}

impl<W: Write> RecordWriter for CsvRecordWriter<W> {
    fn write_record(&mut self, record: &Record) -> Result<()> {
        let datetime = record.datetime_string();
        let (name, message) = if self.escape_newlines {
            (escape_newlines(&record.name), escape_newlines(&record.message))
        } else {
            (Cow::Borrowed(record.name.as_str()), Cow::Borrowed(record.message.as_str()))
        };

        self.writer.write_record([
            datetime.as_str(),
            &*name,
            &*message,
            record.message_type.as_str(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes records to a CSV file.
///
/// # Format
/// - Delimiter: `,` (configurable)
/// - Columns: `datetime`, `name`, `message`, `message_type`
/// - Encoding: UTF-8
pub fn write_csv(records: &[Record], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = CsvRecordWriter::new(BufWriter::new(file), config)?;
    for record in records {
        writer.write_record(record)?;
    }
    writer.finish()
}

/// Converts records to a CSV string.
///
/// Same format as [`write_csv`], but returns a String instead of writing to file.
pub fn to_csv(records: &[Record], config: &OutputConfig) -> Result<String> {
    let mut writer = CsvRecordWriter::new(Vec::new(), config)?;
    for record in records {
        writer.write_record(record)?;
    }
    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}
