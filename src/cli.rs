//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//!
//! # Example
//!
//! ```rust
//! use clap::Parser;
//! use wachat::cli::Args;
//!
//! let args = Args::parse_from(["wachat", "chat.txt", "chat.jsonl", "--strict"]);
//! assert_eq!(args.output_format(), wachat::format::OutputFormat::Jsonl);
//! assert!(args.parser_config().require_records);
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::ParserConfig;
use crate::core::models::OutputConfig;

/// Convert an exported WhatsApp chat transcript into structured rows.
#[derive(Parser, Debug, Clone)]
#[command(name = "wachat")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    wachat \"WhatsApp Chat with Family.txt\" family.csv
    wachat chat.txt chat.jsonl
    wachat chat.txt rows.out --format json
    wachat chat.txt chat.csv --escape-newlines --strict")]
pub struct Args {
    /// Path to the exported transcript
    pub input: String,

    /// Path to the output file
    pub output: String,

    /// Output format (default: detected from the output extension, else CSV)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Fail when the input contains no chat records
    #[arg(long)]
    pub strict: bool,

    /// Write embedded newlines as `\n` so every CSV row is one line
    #[arg(long)]
    pub escape_newlines: bool,

    /// Do not print unknown message diagnostics
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Resolves the output format: explicit flag, then output extension,
    /// then CSV.
    pub fn output_format(&self) -> crate::format::OutputFormat {
        match self.format {
            Some(format) => format.into(),
            None => crate::format::OutputFormat::from_path(&self.output).unwrap_or_default(),
        }
    }

    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::new().with_require_records(self.strict)
    }

    pub fn output_config(&self) -> OutputConfig {
        let config = OutputConfig::new();
        if self.escape_newlines {
            config.with_escaped_newlines()
        } else {
            config
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated rows with a header (default)
    #[default]
    Csv,

    /// JSON array of records
    Json,

    /// JSON Lines - one record object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}
