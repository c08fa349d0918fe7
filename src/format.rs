//! Output format selection.
//!
//! Library-first format types that don't depend on CLI frameworks, plus
//! dispatchers that pick the matching writer from [`core::output`](crate::core::output).
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> wachat::Result<()> {
//! use wachat::format::{OutputFormat, write_records};
//! use wachat::core::models::OutputConfig;
//! use wachat::parser::ChatParser;
//!
//! let parser = ChatParser::new();
//! let log = "1/2/23, 9:00 am - Alice: hello";
//!
//! // Write straight from the lazy record iterator
//! let rows = write_records(parser.records(log), "output.csv", OutputFormat::Csv, &OutputConfig::new())?;
//! assert_eq!(rows, 1);
//!
//! // Or use format detection from extension
//! let format = OutputFormat::from_path("output.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//! # Ok(())
//! # }
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Record;
use crate::core::models::OutputConfig;
use crate::core::output::RecordWriter;
use crate::error::{Result, WachatError};

/// Output format for parsed records.
///
/// # Example
///
/// ```rust
/// use wachat::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("jsonl").unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Comma-separated rows with a header (default)
    #[default]
    Csv,

    /// JSON array of records
    Json,

    /// JSON Lines, one record object per line. Also known as NDJSON.
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "json", "jsonl", "ndjson"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl]
    }

    /// Detects format from a file path based on extension.
    ///
    /// # Example
    ///
    /// ```rust
    /// use wachat::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("rows.CSV").unwrap(), OutputFormat::Csv);
    /// assert!(OutputFormat::from_path("rows.txt").is_err());
    /// ```
    pub fn from_path(path: &str) -> Result<Self> {
        let Some(ext) = Path::new(path).extension().and_then(|e| e.to_str()) else {
            return Err(WachatError::unsupported_format(format!(
                "'{}' has no file extension, expected one of: csv, json, jsonl",
                path
            )));
        };

        match ext.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(WachatError::unsupported_format(format!(
                "unknown file extension '.{}', expected one of: csv, json, jsonl",
                ext
            ))),
        }
    }

    fn feature(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Creates an incremental writer for `format` over `writer`.
///
/// # Errors
///
/// Returns [`WachatError::UnsupportedFormat`] if the format's feature is not
/// enabled, or an output error if the CSV header cannot be written.
#[allow(unused_variables)]
pub fn record_writer<W: Write + 'static>(
    writer: W,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<Box<dyn RecordWriter>> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => Ok(Box::new(crate::core::output::CsvRecordWriter::new(
            writer, config,
        )?)),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => Ok(Box::new(crate::core::output::JsonRecordWriter::new(writer))),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => Ok(Box::new(crate::core::output::JsonlRecordWriter::new(writer))),
        #[allow(unreachable_patterns)]
        _ => Err(WachatError::unsupported_format(format!(
            "{} output requires the '{}' feature to be enabled",
            format,
            format.feature()
        ))),
    }
}

/// Writes a record sequence to `path` one record at a time.
///
/// Accepts the lazy iterators returned by
/// [`ChatParser::records`](crate::parser::ChatParser::records) and
/// [`ChatParser::stream`](crate::parser::ChatParser), so no record list is
/// ever collected. Returns the number of rows written.
///
/// # Errors
///
/// Stops at the first error from `records` or from the writer. Rows already
/// written stay in the file.
pub fn write_records<I>(
    records: I,
    path: &str,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<usize>
where
    I: IntoIterator<Item = Result<Record>>,
{
    let file = File::create(path)?;
    let mut writer = record_writer(BufWriter::new(file), format, config)?;

    let mut rows = 0;
    for record in records {
        writer.write_record(&record?)?;
        rows += 1;
    }
    writer.finish()?;

    debug!(rows, path, %format, "records written");
    Ok(rows)
}

/// Writes a record slice to a file in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
#[allow(unused_variables)]
pub fn write_to_format(
    records: &[Record],
    path: &str,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<()> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(records, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(records, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(records, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(WachatError::unsupported_format(format!(
            "{} output requires the '{}' feature to be enabled",
            format,
            format.feature()
        ))),
    }
}

/// Converts records to a string in the specified format.
///
/// # Example
///
/// ```rust
/// # #[cfg(all(feature = "csv-output", feature = "json-output"))]
/// # fn example() -> wachat::Result<()> {
/// use wachat::format::{OutputFormat, to_format_string};
/// use wachat::core::models::OutputConfig;
/// use wachat::parser::ChatParser;
///
/// let records = ChatParser::new().parse_str("1/2/23, 9:00 am - Alice: hello")?;
/// let csv = to_format_string(&records, OutputFormat::Csv, &OutputConfig::new())?;
/// assert!(csv.ends_with("Alice,hello,message\n"));
/// # Ok(())
/// # }
/// ```
#[allow(unused_variables)]
pub fn to_format_string(
    records: &[Record],
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(records, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(records, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(records, config),
        #[allow(unreachable_patterns)]
        _ => Err(WachatError::unsupported_format(format!(
            "{} output requires the '{}' feature to be enabled",
            format,
            format.feature()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("csv").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(
            OutputFormat::from_str("ndjson").unwrap(),
            OutputFormat::Jsonl
        );
        assert_eq!(OutputFormat::from_str("CSV").unwrap(), OutputFormat::Csv);
        assert!(OutputFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_format_display() {
        assert_eq!(OutputFormat::Csv.to_string(), "CSV");
        assert_eq!(OutputFormat::Jsonl.to_string(), "JSONL");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            OutputFormat::from_path("out.json").unwrap(),
            OutputFormat::Json
        );
        assert_eq!(
            OutputFormat::from_path("/path/to/file.NDJSON").unwrap(),
            OutputFormat::Jsonl
        );
        let err = OutputFormat::from_path("output.txt").unwrap_err();
        assert!(err.to_string().contains(".txt"));
    }

    #[test]
    fn test_format_from_path_without_extension() {
        let err = OutputFormat::from_path("rows").unwrap_err();
        assert!(err.to_string().contains("no file extension"));
        assert!(!err.to_string().contains(".rows"));

        // a dot in a parent directory is not an extension
        let err = OutputFormat::from_path("exports.v2/rows").unwrap_err();
        assert!(err.to_string().contains("no file extension"));
    }

    #[test]
    fn test_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Csv);
        assert_eq!(OutputFormat::all().len(), 3);
    }

    #[test]
    fn test_format_serde() {
        let json = serde_json::to_string(&OutputFormat::Jsonl).unwrap();
        assert_eq!(json, "\"jsonl\"");
    }

    #[cfg(all(feature = "csv-output", feature = "json-output"))]
    #[test]
    fn test_write_records_counts_rows() {
        use crate::parser::ChatParser;

        let dir = tempfile::tempdir().unwrap();
        let log = "junk\n1/2/23, 9:00 am - A: one\ntwo\n1/2/23, 9:05 am - B: three";
        let parser = ChatParser::new();

        for format in OutputFormat::all() {
            let path = dir.path().join(format!("out.{}", format.extension()));
            let path = path.to_str().unwrap();
            let rows = write_records(parser.records(log), path, *format, &OutputConfig::new()).unwrap();
            assert_eq!(rows, 2, "format {}", format);
            assert!(std::fs::metadata(path).unwrap().len() > 0);
        }
    }

    #[cfg(feature = "csv-output")]
    #[test]
    fn test_write_records_stops_on_error() {
        use crate::parser::ChatParser;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let log = "1/2/23, 9:00 am - A: ok\n2/30/23, 9:00 am - A: bad";

        let err = write_records(
            ChatParser::new().records(log),
            path.to_str().unwrap(),
            OutputFormat::Csv,
            &OutputConfig::new(),
        )
        .unwrap_err();
        assert!(err.is_invalid_timestamp());
    }
}
