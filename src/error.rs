//! Unified error types for wachat.
//!
//! This module provides a single [`WachatError`] enum that covers every fatal
//! condition in the library. Unclassifiable message bodies are *not* errors:
//! they become [`MessageType::Unknown`](crate::MessageType::Unknown) records
//! and are reported through the diagnostic channel instead
//! (see [`Diagnostic`](crate::parser::Diagnostic)).
//!
//! # Taxonomy
//!
//! - **I/O failures**: unreadable input, unwritable output
//! - **Invalid timestamps**: a record-start line carried an impossible date
//! - **No records**: only when the parser is configured to require records
//! - **Output format**: unknown or compiled-out output format
//! - **Output encoding**: CSV / JSON serialization failures

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for wachat operations.
///
/// # Example
///
/// ```rust
/// use wachat::error::Result;
/// use wachat::Record;
///
/// fn my_function() -> Result<Vec<Record>> {
///     // ... operations that may fail
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, WachatError>;

/// The error type for all wachat operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WachatError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist or can't be read
    /// - The output file can't be created
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A record-start line matched the timestamp grammar but the captured
    /// components don't form a real date and time (day 32, month 13,
    /// hour 24, minute 60, ...).
    #[error("Invalid timestamp '{input}' on line {line}")]
    InvalidTimestamp {
        /// 1-based line number of the record-start line
        line: usize,
        /// The timestamp prefix as written in the transcript
        input: String,
    },

    /// No line of the input matched the record-start grammar.
    ///
    /// Only produced when [`ParserConfig::require_records`](crate::config::ParserConfig)
    /// is enabled; by default an unrecognizable input yields zero records.
    #[error("No chat records found{}", context.as_ref().map(|c| format!(" in {c}")).unwrap_or_default())]
    NoRecords {
        /// Where the parser was looking (usually a file path)
        context: Option<String>,
    },

    /// The requested output format is unknown or was compiled out.
    #[error("Unsupported output format: {message}")]
    UnsupportedFormat {
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    ///
    /// Occurs when in-memory output is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for WachatError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        WachatError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl WachatError {
    /// Creates an invalid timestamp error.
    pub fn invalid_timestamp(line: usize, input: impl Into<String>) -> Self {
        WachatError::InvalidTimestamp {
            line,
            input: input.into(),
        }
    }

    /// Creates a "no records" error without location context.
    pub fn no_records() -> Self {
        WachatError::NoRecords { context: None }
    }

    /// Creates a "no records" error naming the input it came from.
    pub fn no_records_in(context: impl Into<String>) -> Self {
        WachatError::NoRecords {
            context: Some(context.into()),
        }
    }

    /// Creates an unsupported format error.
    pub fn unsupported_format(message: impl Into<String>) -> Self {
        WachatError::UnsupportedFormat {
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, WachatError::Io(_))
    }

    /// Returns `true` if this is an invalid timestamp error.
    pub fn is_invalid_timestamp(&self) -> bool {
        matches!(self, WachatError::InvalidTimestamp { .. })
    }

    /// Returns `true` if the input contained no records.
    pub fn is_no_records(&self) -> bool {
        matches!(self, WachatError::NoRecords { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
