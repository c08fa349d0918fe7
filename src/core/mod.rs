//! Output side of the pipeline.
//!
//! This module contains:
//! - [`models`] - Output configuration
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() {
//! use wachat::core::{OutputConfig, RecordWriter, write_csv, write_json, write_jsonl};
//! # }
//! ```

pub mod models;
pub mod output;

pub use models::OutputConfig;
pub use output::RecordWriter;

#[cfg(feature = "csv-output")]
pub use output::{CsvRecordWriter, to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{JsonRecordWriter, JsonlRecordWriter, to_json, to_jsonl, write_json, write_jsonl};
