//! Timestamp components captured from a record-start line.
//!
//! Transcripts only carry `M/D/YY, H:MM am|pm`. Years are assumed to be in
//! the 2000s and there is no seconds component.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{Result, WachatError};

/// First calendar year a two-digit transcript year can denote.
pub const EPOCH_YEAR: i32 = 2000;

/// The `am` / `pm` marker of a 12-hour clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    /// Converts a 12-hour clock hour to 24-hour form.
    ///
    /// `12 am` is midnight (0) and `12 pm` is noon (12). Other `pm` hours
    /// below 12 gain 12; everything else passes through unchanged, so
    /// exports that write `0:30 am` or `13:05 am` still parse. Results above
    /// 23 are rejected later by [`RawTimestamp::to_datetime`].
    ///
    /// ```rust
    /// use wachat::parsing::Meridiem;
    ///
    /// assert_eq!(Meridiem::Am.to_24_hour(12), 0);
    /// assert_eq!(Meridiem::Pm.to_24_hour(12), 12);
    /// assert_eq!(Meridiem::Pm.to_24_hour(1), 13);
    /// assert_eq!(Meridiem::Am.to_24_hour(13), 13);
    /// ```
    pub fn to_24_hour(self, hour: u32) -> u32 {
        match (self, hour) {
            (Meridiem::Am, 12) => 0,
            (Meridiem::Pm, h) if h < 12 => h + 12,
            _ => hour,
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Meridiem::Am => write!(f, "am"),
            Meridiem::Pm => write!(f, "pm"),
        }
    }
}

impl FromStr for Meridiem {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "am" | "AM" => Ok(Meridiem::Am),
            "pm" | "PM" => Ok(Meridiem::Pm),
            _ => Err(format!("Unknown time-of-day marker: '{}'", s)),
        }
    }
}

/// Date and time fields exactly as they appear on a record-start line.
///
/// Nothing is validated here beyond "these were digits"; calendar checks
/// happen in [`RawTimestamp::to_datetime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTimestamp {
    pub month: u32,
    pub day: u32,
    /// Two-digit year (years since 2000).
    pub year: u32,
    /// Hour on the 12-hour clock.
    pub hour: u32,
    pub minute: u32,
    pub meridiem: Meridiem,
}

impl RawTimestamp {
    /// Returns the calendar year (`2000 + year`).
    pub fn calendar_year(&self) -> i32 {
        // year is at most two digits, so this never overflows
        EPOCH_YEAR + self.year as i32
    }

    /// Builds the record timestamp.
    ///
    /// `line` is only used to report where an impossible date came from.
    pub fn to_datetime(&self, line: usize) -> Result<NaiveDateTime> {
        let invalid = || WachatError::invalid_timestamp(line, self.to_string());

        let hour = self.meridiem.to_24_hour(self.hour);

        NaiveDate::from_ymd_opt(self.calendar_year(), self.month, self.day)
            .and_then(|date| date.and_hms_opt(hour, self.minute, 0))
            .ok_or_else(invalid)
    }
}

impl fmt::Display for RawTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{:02}, {}:{:02} {}",
            self.month, self.day, self.year, self.hour, self.minute, self.meridiem
        )
    }
}
