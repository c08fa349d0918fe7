//! Output configuration.

use serde::{Deserialize, Serialize};

/// Configuration for record output.
///
/// Controls how rows are laid out by the CSV writer. JSON and JSONL output
/// always carry all four fields and ignore these settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// CSV field delimiter (default: `,`)
    pub delimiter: u8,
    /// Escape `\`, `\n` and `\r` inside fields so every row stays on one
    /// physical line (default: false, newlines are kept inside quoted fields)
    pub escape_newlines: bool,
    /// Write the `datetime,name,message,message_type` header row (default: true)
    pub include_header: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            escape_newlines: false,
            include_header: true,
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_escaped_newlines(mut self) -> Self {
        self.escape_newlines = true;
        self
    }

    #[must_use]
    pub fn without_header(mut self) -> Self {
        self.include_header = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_config_default() {
        let config = OutputConfig::new();
        assert_eq!(config.delimiter, b',');
        assert!(!config.escape_newlines);
        assert!(config.include_header);
    }

    #[test]
    fn test_output_config_builder() {
        let config = OutputConfig::new()
            .with_delimiter(b';')
            .with_escaped_newlines()
            .without_header();

        assert_eq!(config.delimiter, b';');
        assert!(config.escape_newlines);
        assert!(!config.include_header);
    }
}
