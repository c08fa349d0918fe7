//! Record segmentation: turning physical lines into logical records.
//!
//! A transcript line never says "I am a continuation". The only signal is
//! the record-start grammar:
//!
//! ```text
//! M/D/YY, H:MM am - <message>
//! 1/2/23, 9:00 am - Alice: hello
//! ```
//!
//! A line that fully matches opens a new record. Every other line is folded
//! into the body of the currently open record, joined by a single `\n`.
//! Lines before the first record-start line are dropped.
//!
//! A continuation line that happens to look like a record-start line is
//! treated as a new record. There is no way to tell the two apart.

use std::io;
use std::iter::Map;
use std::str::Lines;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::trace;

use super::timestamp::{Meridiem, RawTimestamp};

/// Full-line grammar of a record-start line.
///
/// `message` may span lines (`(?s)`) so the same pattern can be applied to
/// already-assembled multi-line text.
pub const RECORD_START_PATTERN: &str = concat!(
    r"(?s)^(?P<month>[0-9]{1,2})/(?P<day>[0-9]{1,2})/(?P<year>[0-9]{1,2}), ",
    r"(?P<hour>[0-9]{1,2}):(?P<minute>[0-9]{2}) (?P<meridiem>am|pm|AM|PM) - ",
    r"(?P<message>.+)$",
);

static RECORD_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(RECORD_START_PATTERN).expect("record-start pattern is valid"));

/// Returns `true` if `line` opens a new record.
pub fn is_record_start(line: &str) -> bool {
    RECORD_START.is_match(line)
}

/// Splits a record-start line into its timestamp fields and the initial
/// message fragment. Returns `None` for continuation lines.
pub fn match_record_start(line: &str) -> Option<(RawTimestamp, &str)> {
    let caps = RECORD_START.captures(line)?;
    let timestamp = RawTimestamp {
        month: number(&caps, "month")?,
        day: number(&caps, "day")?,
        year: number(&caps, "year")?,
        hour: number(&caps, "hour")?,
        minute: number(&caps, "minute")?,
        meridiem: caps.name("meridiem")?.as_str().parse::<Meridiem>().ok()?,
    };
    let message = caps.name("message")?.as_str();
    Some((timestamp, message))
}

fn number(caps: &Captures<'_>, group: &str) -> Option<u32> {
    caps.name(group)?.as_str().parse().ok()
}

/// A record being assembled: the fields of its record-start line plus the
/// body accumulated so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRecord {
    /// 1-based input line number of the record-start line.
    pub line: usize,
    pub timestamp: RawTimestamp,
    pub body: String,
}

impl OpenRecord {
    /// Opens a record if `text` is a record-start line.
    pub fn start(line: usize, text: &str) -> Option<Self> {
        let (timestamp, message) = match_record_start(text)?;
        Some(Self {
            line,
            timestamp,
            body: message.to_string(),
        })
    }

    /// Appends a continuation line, preserving the line break.
    pub fn push_continuation(&mut self, text: &str) {
        self.body.push('\n');
        self.body.push_str(text);
    }
}

/// Lazily segments a line source into [`OpenRecord`]s.
///
/// The source yields `io::Result` items so that file-backed readers can
/// surface read errors; the first error ends the sequence.
///
/// # Example
///
/// ```rust
/// use wachat::parsing::segment_str;
///
/// let log = "1/2/23, 9:00 am - Alice: hello\nworld\n1/2/23, 9:01 am - Bob: hi";
/// let records: Vec<_> = segment_str(log).collect::<Result<_, _>>().unwrap();
///
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].body, "Alice: hello\nworld");
/// assert_eq!(records[1].line, 3);
/// ```
pub struct Segmenter<I> {
    lines: I,
    lines_read: usize,
    pending: Option<OpenRecord>,
    finished: bool,
}

impl<I> Segmenter<I> {
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            lines_read: 0,
            pending: None,
            finished: false,
        }
    }

    /// Number of physical lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// The underlying line source.
    pub fn source(&self) -> &I {
        &self.lines
    }
}

impl<I, L> Iterator for Segmenter<I>
where
    I: Iterator<Item = io::Result<L>>,
    L: AsRef<str>,
{
    type Item = io::Result<OpenRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.lines.next() {
                Some(Ok(line)) => {
                    self.lines_read += 1;
                    let text = line.as_ref();

                    if let Some(started) = OpenRecord::start(self.lines_read, text) {
                        if let Some(done) = self.pending.replace(started) {
                            return Some(Ok(done));
                        }
                    } else if let Some(open) = self.pending.as_mut() {
                        open.push_continuation(text);
                    } else {
                        trace!(line = self.lines_read, "skipping line before first record");
                    }
                }
                Some(Err(e)) => {
                    self.finished = true;
                    self.pending = None;
                    return Some(Err(e));
                }
                None => {
                    self.finished = true;
                    return self.pending.take().map(Ok);
                }
            }
        }
    }
}

/// Line source over an in-memory string.
pub type StrLines<'a> = Map<Lines<'a>, fn(&'a str) -> io::Result<&'a str>>;

fn infallible(line: &str) -> io::Result<&str> {
    Ok(line)
}

/// Segments an in-memory transcript.
pub fn segment_str(content: &str) -> Segmenter<StrLines<'_>> {
    Segmenter::new(content.lines().map(infallible as fn(&str) -> io::Result<&str>))
}
