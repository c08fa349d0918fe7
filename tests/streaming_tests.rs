//! Integration tests for the streaming record reader.

#![cfg(feature = "streaming")]

use std::io::Write;

use tempfile::NamedTempFile;
use wachat::config::ParserConfig;
use wachat::parser::ChatParser;
use wachat::{MessageType, Record, Result};

/// Helper to create a transcript file with `count` records, every third of
/// them spanning two lines.
fn create_transcript_file(count: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Messages and calls are end-to-end encrypted.").unwrap();

    for i in 0..count {
        let sender = if i % 2 == 0 { "Alice" } else { "Bob" };
        let minute = i % 60;
        let hour = (i / 60) % 12 + 1;
        if i % 3 == 0 {
            writeln!(file, "1/2/23, {}:{:02} pm - {}: Message number {}", hour, minute, sender, i).unwrap();
            writeln!(file, "continued").unwrap();
        } else {
            writeln!(file, "1/2/23, {}:{:02} pm - {} left", hour, minute, sender).unwrap();
        }
    }
    file.flush().unwrap();
    file
}

#[test]
fn test_streaming_basic() {
    let file = create_transcript_file(100);
    let records: Vec<Record> = ChatParser::new()
        .stream(file.path())
        .unwrap()
        .collect::<Result<_>>()
        .unwrap();

    assert_eq!(records.len(), 100);
    assert_eq!(records[0].name, "Alice");
    assert_eq!(records[0].message, "Message number 0\ncontinued");
    assert_eq!(records[1].message_type, MessageType::Left);
    assert_eq!(records[1].name, "Bob");
}

#[test]
fn test_streaming_matches_in_memory_parse() {
    let file = create_transcript_file(500);
    let parser = ChatParser::new();

    let streamed: Vec<Record> = parser
        .stream(file.path())
        .unwrap()
        .collect::<Result<_>>()
        .unwrap();
    let loaded = parser.parse(file.path()).unwrap();

    assert_eq!(streamed, loaded);
}

#[test]
fn test_streaming_small_buffer() {
    let file = create_transcript_file(200);
    let parser = ChatParser::with_config(ParserConfig::new().with_buffer_size(16));

    let count = parser.stream(file.path()).unwrap().filter(|r| r.is_ok()).count();
    assert_eq!(count, 200);
}

#[test]
fn test_streaming_progress_is_monotonic() {
    let file = create_transcript_file(300);
    let mut stream = ChatParser::new().stream(file.path()).unwrap();

    let mut last = 0.0;
    while let Some(record) = stream.next() {
        record.unwrap();
        let progress = stream.progress().unwrap();
        assert!(progress >= last);
        assert!(progress <= 100.0);
        last = progress;
    }
    assert_eq!(stream.bytes_processed(), stream.total_bytes());
    assert_eq!(stream.records_emitted(), 300);
    assert_eq!(stream.diagnostics_emitted(), 0);
}

#[test]
fn test_streaming_invalid_timestamp_stops() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "1/2/23, 9:00 am - A: ok").unwrap();
    writeln!(file, "2/30/23, 9:00 am - A: bad").unwrap();
    writeln!(file, "3/1/23, 9:00 am - A: unreachable").unwrap();
    file.flush().unwrap();

    let results: Vec<_> = ChatParser::new().stream(file.path()).unwrap().collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(results[1].as_ref().unwrap_err().is_invalid_timestamp());
}

#[test]
fn test_streaming_invalid_utf8_is_io_error() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"1/2/23, 9:00 am - A: ok\n").unwrap();
    file.write_all(&[0xff, 0xfe, b'\n']).unwrap();
    file.flush().unwrap();

    let results: Vec<_> = ChatParser::new().stream(file.path()).unwrap().collect();
    let last = results.last().unwrap();
    assert!(last.as_ref().unwrap_err().is_io());
}

#[test]
fn test_streaming_unknown_counted() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "1/2/23, 9:00 am - ???").unwrap();
    writeln!(file, "1/2/23, 9:01 am - A: fine").unwrap();
    file.flush().unwrap();

    let mut stream = ChatParser::new().stream(file.path()).unwrap();
    let records: Vec<Record> = stream.by_ref().collect::<Result<_>>().unwrap();
    assert_eq!(records[0].message_type, MessageType::Unknown);
    assert_eq!(stream.diagnostics_emitted(), 1);
}
