//! # wachat
//!
//! A Rust library for turning exported WhatsApp chat transcripts into
//! structured records.
//!
//! ## Overview
//!
//! An export is a plain-text file in which every entry starts with a
//! timestamp prefix (`1/2/23, 9:00 am - `). Entries may span several lines,
//! and besides ordinary messages the export contains system notices (joins,
//! leaves, group renames, security code changes, ...). wachat:
//!
//! - folds continuation lines into the entry they belong to
//!   ([`parsing::segmenter`])
//! - classifies every entry body into a [`MessageType`] and extracts the
//!   actor name and contents ([`parsing::classifier`])
//! - converts the 12-hour timestamp into a calendar date and time
//! - writes the result as CSV, JSON or JSON Lines ([`core::output`])
//!
//! ## Quick Start
//!
//! ```rust
//! use wachat::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let log = "\
//! 1/2/23, 9:00 am - Alice: hello
//! world
//! 1/2/23, 9:01 am - Alice added Bob";
//!
//!     let records = ChatParser::new().parse_str(log)?;
//!
//!     assert_eq!(records.len(), 2);
//!     assert_eq!(records[0].message, "hello\nworld");
//!     assert_eq!(records[1].message_type, MessageType::Added);
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming for Large Files
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "streaming", feature = "csv-output"))]
//! # fn main() -> wachat::Result<()> {
//! use wachat::prelude::*;
//! use wachat::format::{OutputFormat, write_records};
//!
//! let parser = ChatParser::new();
//! let stream = parser.stream("WhatsApp Chat with Family.txt".as_ref())?;
//!
//! let rows = write_records(stream, "family.csv", OutputFormat::Csv, &OutputConfig::new())?;
//! println!("Wrote {} rows", rows);
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "streaming", feature = "csv-output")))]
//! # fn main() {}
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`ChatParser`], the lazy [`Records`](parser::Records) iterator and diagnostics
//! - [`parsing`] - segmenter, classifier and timestamp building blocks
//! - [`record`] - the [`Record`] output unit
//! - [`config`] - [`ParserConfig`](config::ParserConfig)
//! - [`core`] - [`OutputConfig`](core::OutputConfig) and the format writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat) selection and dispatch
//! - `streaming` - file-backed record stream with progress (feature `streaming`)
//! - `cli` - clap argument types (feature `cli`)
//! - [`error`] - [`WachatError`] and [`Result`]
//! - [`prelude`] - Convenient re-exports
//!
//! ## Features
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `csv-output` | CSV writers (`csv`) |
//! | `json-output` | JSON / JSONL writers (`serde_json`) |
//! | `streaming` | [`ChatParser::stream`] |
//! | `cli` | the `wachat` binary |
//! | `gen-test` | the `gen_test` transcript generator (`rand`) |

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod parser;
pub mod parsing;
pub mod record;
#[cfg(feature = "streaming")]
pub mod streaming;

// Re-export the main types at the crate root for convenience
pub use error::{Result, WachatError};
pub use parser::ChatParser;
pub use parsing::MessageType;
pub use record::Record;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use wachat::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Record;
    pub use crate::error::{Result, WachatError};
    pub use crate::parsing::{MessageType, NOT_AVAILABLE};

    pub use crate::config::ParserConfig;
    pub use crate::parser::{ChatParser, Diagnostic, DiagnosticCallback};

    pub use crate::core::models::OutputConfig;
    pub use crate::core::output::RecordWriter;

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    pub use crate::format::OutputFormat;

    #[cfg(feature = "streaming")]
    pub use crate::streaming::RecordStream;
}
