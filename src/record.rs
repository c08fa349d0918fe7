//! The final output unit of the parser.
//!
//! A [`Record`] is one logical transcript entry: when it was sent, who sent
//! it, what it said and what kind of entry it is.
//!
//! # Serialization
//!
//! Records serialize with the column names used by the tabular output
//! (`datetime`, `name`, `message`, `message_type`). `datetime` is written as
//! `YYYY-MM-DD HH:MM:SS` and `message_type` as its snake_case tag:
//!
//! ```
//! use wachat::{MessageType, Record};
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let record = Record::new(ts, "Alice", "hello", MessageType::Message);
//! let json = serde_json::to_string(&record)?;
//!
//! assert_eq!(
//!     json,
//!     r#"{"datetime":"2023-01-02 09:00:00","name":"Alice","message":"hello","message_type":"message"}"#
//! );
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::parsing::{MessageType, NOT_AVAILABLE};

/// Layout of the `datetime` column.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One classified transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// When the entry was sent (transcript local time, no timezone).
    #[serde(rename = "datetime", with = "datetime_format")]
    pub timestamp: NaiveDateTime,

    /// Actor name, or `"N/A"` when the entry has no attributable sender.
    pub name: String,

    /// Message contents for chat messages, the full body otherwise.
    ///
    /// May contain newlines for multi-line messages.
    pub message: String,

    pub message_type: MessageType,
}

impl Record {
    pub fn new(
        timestamp: NaiveDateTime,
        name: impl Into<String>,
        message: impl Into<String>,
        message_type: MessageType,
    ) -> Self {
        Self {
            timestamp,
            name: name.into(),
            message: message.into(),
            message_type,
        }
    }

    /// Returns `true` if no sender could be attributed.
    pub fn is_anonymous(&self) -> bool {
        self.name == NOT_AVAILABLE
    }

    /// Returns `true` for notices generated by WhatsApp itself.
    pub fn is_system(&self) -> bool {
        self.message_type.is_system()
    }

    /// Returns the `datetime` column value.
    pub fn datetime_string(&self) -> String {
        self.timestamp.format(DATETIME_FORMAT).to_string()
    }
}

mod datetime_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATETIME_FORMAT;

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&ts.format(DATETIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, DATETIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_record_new() {
        let record = Record::new(ts(9, 0), "Alice", "hi", MessageType::Message);
        assert_eq!(record.name, "Alice");
        assert_eq!(record.message, "hi");
        assert!(!record.is_anonymous());
        assert!(!record.is_system());
    }

    #[test]
    fn test_anonymous_and_system() {
        let record = Record::new(ts(9, 0), NOT_AVAILABLE, "You left", MessageType::YouLeft);
        assert!(record.is_anonymous());
        assert!(record.is_system());
    }

    #[test]
    fn test_datetime_string() {
        let record = Record::new(ts(21, 5), "Bob", "x", MessageType::Message);
        assert_eq!(record.datetime_string(), "2023-01-02 21:05:00");
    }

    #[test]
    fn test_serialization_column_names() {
        let record = Record::new(ts(9, 0), "Alice", "a\nb", MessageType::Message);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""datetime":"2023-01-02 09:00:00""#));
        assert!(json.contains(r#""message":"a\nb""#));
        assert!(json.contains(r#""message_type":"message""#));
        assert!(!json.contains("timestamp"));
    }

    #[test]
    fn test_deserialization() {
        let json = r#"{"datetime":"2023-01-02 13:45:00","name":"N/A","message":"@@","message_type":"unknown"}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.timestamp, ts(13, 45));
        assert_eq!(record.message_type, MessageType::Unknown);
        assert!(record.is_anonymous());
    }

    #[test]
    fn test_deserialization_rejects_bad_datetime() {
        let json = r#"{"datetime":"yesterday","name":"A","message":"m","message_type":"message"}"#;
        assert!(serde_json::from_str::<Record>(json).is_err());
    }
}
