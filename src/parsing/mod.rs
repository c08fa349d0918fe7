//! Transcript parsing building blocks.
//!
//! - [`segmenter`] - folds physical lines into logical records
//! - [`classifier`] - tags a record body and extracts its fields
//! - [`timestamp`] - 12-hour timestamp fields and their conversion
//!
//! [`ChatParser`](crate::parser::ChatParser) combines these; use them
//! directly only when you need the intermediate values.

pub mod classifier;
pub mod segmenter;
pub mod timestamp;

// Re-export commonly used items
pub use classifier::{Classification, MessageType, NOT_AVAILABLE, classify};
pub use segmenter::{
    OpenRecord, RECORD_START_PATTERN, Segmenter, StrLines, is_record_start, match_record_start,
    segment_str,
};
pub use timestamp::{Meridiem, RawTimestamp};
