//! Edge case tests for segmentation, timestamps and classification.

use chrono::{Datelike, Timelike};
use wachat::parser::ChatParser;
use wachat::parsing::{is_record_start, match_record_start, segment_str};
use wachat::{MessageType, Record};

fn parse(input: &str) -> Vec<Record> {
    ChatParser::new().parse_str(input).unwrap()
}

// ============================================================================
// Segmentation
// ============================================================================

mod segmentation {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n\n").is_empty());
    }

    #[test]
    fn test_lines_before_first_record_are_dropped() {
        let records = parse("header\nmore header\n1/2/23, 9:00 am - A: x");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "x");
    }

    #[test]
    fn test_blank_continuation_lines_kept() {
        let records = parse("1/2/23, 9:00 am - A: first\n\n\nlast");
        assert_eq!(records[0].message, "first\n\n\nlast");
    }

    #[test]
    fn test_trailing_newline_adds_nothing() {
        let records = parse("1/2/23, 9:00 am - A: x\n");
        assert_eq!(records[0].message, "x");
    }

    #[test]
    fn test_crlf_line_endings() {
        let records = parse("1/2/23, 9:00 am - A: one\r\ntwo\r\n1/2/23, 9:01 am - B: three\r\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "one\ntwo");
        assert_eq!(records[1].message, "three");
    }

    #[test]
    fn test_timestamp_like_continuation_starts_new_record() {
        // Known limitation: the record-start grammar is the only signal
        let records = parse("1/2/23, 9:00 am - A: quoting\n1/1/23, 8:00 am - B: old message");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "B");
    }

    #[test]
    fn test_near_miss_prefixes_are_continuations() {
        let near_misses = [
            "1/2/2023, 9:00 am - A: four digit year",
            "1/2/23 9:00 am - A: missing comma",
            "1/2/23, 9:00 - A: missing meridiem",
            "1/2/23, 9:0 am - A: one digit minute",
            "1/2/23, 9:00 a.m. - A: dotted meridiem",
            "[1/2/23, 9:00:00 AM] A: ios format",
            "1/2/23, 9:00 am - ",
            " 1/2/23, 9:00 am - A: leading space",
        ];
        for line in near_misses {
            assert!(!is_record_start(line), "{:?}", line);
            let input = format!("1/2/23, 9:00 am - A: start\n{}", line);
            let records = parse(&input);
            assert_eq!(records.len(), 1, "{:?}", line);
            assert_eq!(records[0].message, format!("start\n{}", line));
        }
    }

    #[test]
    fn test_uppercase_meridiem_accepted() {
        assert!(is_record_start("1/2/23, 9:00 PM - A: x"));
        let records = parse("1/2/23, 9:00 PM - A: x");
        assert_eq!(records[0].timestamp.hour(), 21);
    }

    #[test]
    fn test_unicode_digits_rejected() {
        assert!(!is_record_start("١/٢/٢٣, ٩:٠٠ am - A: x"));
    }

    #[test]
    fn test_match_record_start_fields() {
        let (ts, message) = match_record_start("12/31/99, 11:59 pm - A: bye").unwrap();
        assert_eq!((ts.month, ts.day, ts.year), (12, 31, 99));
        assert_eq!((ts.hour, ts.minute), (11, 59));
        assert_eq!(message, "A: bye");
    }

    #[test]
    fn test_record_count_matches_start_lines() {
        let input = "noise\n1/2/23, 9:00 am - A: a\nb\n1/2/23, 9:01 am - B: c\n\n1/2/23, 9:02 am - C: d";
        let starts = input.lines().filter(|l| is_record_start(l)).count();
        assert_eq!(segment_str(input).count(), starts);
        assert_eq!(parse(input).len(), starts);
    }
}

// ============================================================================
// Timestamps
// ============================================================================

mod timestamps {
    use super::*;

    #[test]
    fn test_two_digit_year_in_2000s() {
        let records = parse("6/7/05, 1:00 pm - A: x\n6/7/99, 1:00 pm - A: y");
        assert_eq!(records[0].timestamp.year(), 2005);
        assert_eq!(records[1].timestamp.year(), 2099);
    }

    #[test]
    fn test_single_digit_year() {
        let records = parse("6/7/5, 1:00 pm - A: x");
        assert_eq!(records[0].timestamp.year(), 2005);
    }

    #[test]
    fn test_leap_day() {
        let records = parse("2/29/24, 10:00 am - A: leap");
        assert_eq!(records[0].timestamp.day(), 29);

        let err = ChatParser::new()
            .parse_str("2/29/23, 10:00 am - A: not leap")
            .unwrap_err();
        assert!(err.is_invalid_timestamp());
    }

    #[test]
    fn test_out_of_range_components_are_fatal() {
        let bad = [
            "1/32/23, 9:00 am - A: day 32",
            "13/1/23, 9:00 am - A: month 13",
            "0/1/23, 9:00 am - A: month 0",
            "1/2/23, 24:00 am - A: hour 24",
            "1/2/23, 25:00 pm - A: hour 25",
            "1/2/23, 9:60 am - A: minute 60",
        ];
        for line in bad {
            let err = ChatParser::new().parse_str(line).unwrap_err();
            assert!(err.is_invalid_timestamp(), "{:?}", line);
            assert!(err.to_string().contains("line 1"), "{:?}", line);
        }
    }

    #[test]
    fn test_error_reports_record_start_line() {
        let input = "pre\n1/2/23, 9:00 am - A: ok\ncontinued\n4/31/23, 9:00 am - A: bad";
        let err = ChatParser::new().parse_str(input).unwrap_err();
        assert!(err.to_string().contains("line 4"));
    }

    #[test]
    fn test_am_hours_outside_12_hour_clock_pass_through() {
        let records = parse("1/2/23, 0:30 am - A: early\n1/2/23, 13:05 am - A: late\n1/2/23, 13:05 pm - A: also late");
        assert_eq!(records.len(), 3);
        assert_eq!((records[0].timestamp.hour(), records[0].timestamp.minute()), (0, 30));
        assert_eq!((records[1].timestamp.hour(), records[1].timestamp.minute()), (13, 5));
        assert_eq!(records[2].timestamp.hour(), 13);
    }

    #[test]
    fn test_seconds_are_zero() {
        let records = parse("1/2/23, 9:07 am - A: x");
        assert_eq!(records[0].timestamp.second(), 0);
        assert_eq!(records[0].datetime_string(), "2023-01-02 09:07:00");
    }
}

// ============================================================================
// Classification through the parser
// ============================================================================

mod classification {
    use super::*;

    #[test]
    fn test_continuation_breaks_system_message_shape() {
        let records = parse(
            "1/2/23, 9:00 am - Alice changed the subject from \"Line one\nline two\" to \"New\"\n\
             1/2/23, 9:01 am - Alice added Bob\nextra",
        );
        assert_eq!(records[0].message_type, MessageType::Unknown);
        assert_eq!(records[0].name, "N/A");
        assert_eq!(records[1].message_type, MessageType::Unknown);
        assert_eq!(records[1].message, "Alice added Bob\nextra");
    }

    #[test]
    fn test_continuation_breaks_single_line_shape() {
        // "You left" has no dotall and must be the entire body
        let records = parse("1/2/23, 9:00 am - You left\nextra");
        assert_eq!(records[0].message_type, MessageType::Unknown);
        assert_eq!(records[0].message, "You left\nextra");
    }

    #[test]
    fn test_you_left_is_not_a_named_left() {
        let records = parse("1/2/23, 9:00 am - You left\n1/2/23, 9:01 am - Bob left");
        assert_eq!(records[0].message_type, MessageType::YouLeft);
        assert_eq!(records[0].name, "N/A");
        assert_eq!(records[1].message_type, MessageType::Left);
        assert_eq!(records[1].name, "Bob");
    }

    #[test]
    fn test_empty_contents_is_unknown() {
        // "NAME: " needs at least one character of contents
        let records = parse("1/2/23, 9:00 am - Alice: ");
        assert_eq!(records[0].message_type, MessageType::Unknown);
    }

    #[test]
    fn test_unicode_names_and_contents() {
        let records = parse("1/2/23, 9:00 am - Иван Петров: Привет 🌍\n1/2/23, 9:01 am - 村上 added محمد");
        assert_eq!(records[0].name, "Иван Петров");
        assert_eq!(records[0].message, "Привет 🌍");
        assert_eq!(records[1].message_type, MessageType::Added);
        assert_eq!(records[1].name, "村上");
    }

    #[test]
    fn test_phone_number_names() {
        let records = parse("1/2/23, 9:00 am - +44 7700 900123: hi");
        assert_eq!(records[0].name, "+44 7700 900123");
        assert_eq!(records[0].message, "hi");
    }

    #[test]
    fn test_very_long_message() {
        let long = "x".repeat(200_000);
        let records = parse(&format!("1/2/23, 9:00 am - A: {}", long));
        assert_eq!(records[0].message.len(), 200_000);
    }
}
