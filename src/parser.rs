//! Transcript parser: segmentation + classification in one pass.
//!
//! [`ChatParser`] is the main entry point. It turns an exported transcript
//! into an ordered sequence of [`Record`]s, either lazily
//! ([`ChatParser::records`]) or collected ([`ChatParser::parse_str`],
//! [`ChatParser::parse`]).
//!
//! # Example
//!
//! ```rust
//! use wachat::parser::ChatParser;
//! use wachat::MessageType;
//!
//! let log = "\
//! 1/2/23, 9:00 am - Alice: hello
//! world
//! 1/2/23, 9:01 am - Alice added Bob";
//!
//! let records = ChatParser::new().parse_str(log)?;
//!
//! assert_eq!(records[0].name, "Alice");
//! assert_eq!(records[0].message, "hello\nworld");
//! assert_eq!(records[1].message_type, MessageType::Added);
//! # Ok::<(), wachat::WachatError>(())
//! ```
//!
//! # Diagnostics
//!
//! Bodies that match no known shape are not errors. They become
//! [`MessageType::Unknown`](crate::MessageType::Unknown) records named
//! `"N/A"` that keep the raw body as their message, and a [`Diagnostic`] is
//! logged (`tracing::warn!`) and handed to the callback registered with
//! [`ChatParser::with_diagnostic_callback`].

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::Record;
use crate::config::ParserConfig;
use crate::error::{Result, WachatError};
use crate::parsing::{OpenRecord, Segmenter, StrLines, classify, segment_str};

/// A record whose body matched no known message shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based input line number of the record-start line.
    pub line: usize,
    /// The unclassified body, verbatim.
    pub body: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: unknown message type: {}", self.line, self.body)
    }
}

/// Callback receiving every [`Diagnostic`] as it is produced.
///
/// # Example
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use wachat::parser::{ChatParser, DiagnosticCallback};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// let callback: DiagnosticCallback = Arc::new(move |d| sink.lock().unwrap().push(d.line));
///
/// let parser = ChatParser::new().with_diagnostic_callback(callback);
/// parser.parse_str("1/2/23, 9:00 am - @@garbled@@")?;
///
/// assert_eq!(*seen.lock().unwrap(), vec![1]);
/// # Ok::<(), wachat::WachatError>(())
/// ```
pub type DiagnosticCallback = Arc<dyn Fn(&Diagnostic) + Send + Sync>;

/// Creates a callback that prints each diagnostic to stderr.
pub fn stderr_diagnostics() -> DiagnosticCallback {
    Arc::new(|diagnostic| {
        eprintln!(
            "⚠️  Unknown message type on line {}: {}. Please file an issue!",
            diagnostic.line, diagnostic.body
        );
    })
}

/// Parser for exported WhatsApp transcripts.
#[derive(Clone, Default)]
pub struct ChatParser {
    config: ParserConfig,
    on_diagnostic: Option<DiagnosticCallback>,
}

impl fmt::Debug for ChatParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatParser")
            .field("config", &self.config)
            .field("on_diagnostic", &self.on_diagnostic.is_some())
            .finish()
    }
}

impl ChatParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            on_diagnostic: None,
        }
    }

    /// Registers a callback for unclassifiable records.
    #[must_use]
    pub fn with_diagnostic_callback(mut self, callback: DiagnosticCallback) -> Self {
        self.on_diagnostic = Some(callback);
        self
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Lazily parses an in-memory transcript.
    ///
    /// Each item is produced only when requested, so a consumer can write
    /// records out one at a time.
    pub fn records<'a>(&self, content: &'a str) -> Records<StrLines<'a>> {
        self.records_from(segment_str(content), None)
    }

    /// Builds a record iterator over any segmenter.
    ///
    /// `context` names the input in a [`NoRecords`](WachatError::NoRecords)
    /// error.
    pub fn records_from<I>(&self, segmenter: Segmenter<I>, context: Option<String>) -> Records<I> {
        Records {
            segmenter,
            on_diagnostic: self.on_diagnostic.clone(),
            require_records: self.config.require_records,
            context,
            emitted: 0,
            diagnostics: 0,
            done: false,
        }
    }

    /// Parses an in-memory transcript into records.
    pub fn parse_str(&self, content: &str) -> Result<Vec<Record>> {
        self.records(content).collect()
    }

    /// Reads a transcript file fully into memory and parses it.
    pub fn parse(&self, path: &Path) -> Result<Vec<Record>> {
        let content = fs::read_to_string(path)?;
        self.records_from(segment_str(&content), Some(path.display().to_string()))
            .collect()
    }

    /// Parses a transcript file (convenience method accepting &str path).
    pub fn parse_file(&self, path: &str) -> Result<Vec<Record>> {
        self.parse(Path::new(path))
    }
}

/// Lazy iterator of classified [`Record`]s.
///
/// Stops after the first error: I/O failures and impossible timestamps are
/// fatal.
pub struct Records<I> {
    segmenter: Segmenter<I>,
    on_diagnostic: Option<DiagnosticCallback>,
    require_records: bool,
    context: Option<String>,
    emitted: usize,
    diagnostics: usize,
    done: bool,
}

impl<I> Records<I> {
    /// Number of records produced so far.
    pub fn records_emitted(&self) -> usize {
        self.emitted
    }

    /// Number of unclassifiable records seen so far.
    pub fn diagnostics_emitted(&self) -> usize {
        self.diagnostics
    }

    /// Number of physical input lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.segmenter.lines_read()
    }

    /// The underlying line source.
    pub fn source(&self) -> &I {
        self.segmenter.source()
    }

    fn finish(&mut self, open: OpenRecord) -> Result<Record> {
        let timestamp = open.timestamp.to_datetime(open.line)?;
        let classification = classify(&open.body);

        if classification.is_unknown() {
            self.report(Diagnostic {
                line: open.line,
                body: open.body.clone(),
            });
        }

        Ok(Record::new(
            timestamp,
            classification.record_name(),
            classification.record_message(&open.body),
            classification.message_type,
        ))
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics += 1;
        warn!(line = diagnostic.line, body = %diagnostic.body, "unknown message type");
        if let Some(callback) = &self.on_diagnostic {
            callback(&diagnostic);
        }
    }

    fn no_records(&self) -> WachatError {
        match &self.context {
            Some(context) => WachatError::no_records_in(context.clone()),
            None => WachatError::no_records(),
        }
    }
}

impl<I, L> Iterator for Records<I>
where
    I: Iterator<Item = io::Result<L>>,
    L: AsRef<str>,
{
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.segmenter.next() {
            Some(Ok(open)) => {
                let result = self.finish(open);
                match result {
                    Ok(_) => self.emitted += 1,
                    Err(_) => self.done = true,
                }
                Some(result)
            }
            Some(Err(e)) => {
                self.done = true;
                Some(Err(e.into()))
            }
            None => {
                self.done = true;
                debug!(
                    records = self.emitted,
                    unknown = self.diagnostics,
                    lines = self.segmenter.lines_read(),
                    "transcript parsed"
                );
                if self.require_records && self.emitted == 0 {
                    Some(Err(self.no_records()))
                } else {
                    None
                }
            }
        }
    }
}
