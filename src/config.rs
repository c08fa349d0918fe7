//! Parser configuration.
//!
//! Plain, serde-serializable structs with builder-style setters; no CLI
//! framework dependencies. Output options live in
//! [`OutputConfig`](crate::core::models::OutputConfig).
//!
//! # Example
//!
//! ```rust
//! use wachat::config::ParserConfig;
//! use wachat::parser::ChatParser;
//!
//! let config = ParserConfig::new()
//!     .with_require_records(true)
//!     .with_buffer_size(128 * 1024);
//!
//! let parser = ChatParser::with_config(config);
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for transcript parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Fail with [`NoRecords`](crate::WachatError::NoRecords) when no line
    /// of the input looks like a record start (default: false, an
    /// unrecognizable input yields zero records)
    pub require_records: bool,

    /// Read buffer size for the streaming reader (default: 64KB)
    pub buffer_size: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            require_records: false,
            buffer_size: 64 * 1024, // 64KB
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that treats an input without records as an
    /// error.
    pub fn strict() -> Self {
        Self {
            require_records: true,
            ..Self::default()
        }
    }

    /// Sets whether an input without any record is an error.
    #[must_use]
    pub fn with_require_records(mut self, require: bool) -> Self {
        self.require_records = require;
        self
    }

    /// Sets the buffer size for streaming.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }
}
