/*!
 * Tests for LRC parsing and timestamp formatting
 */

use bilyric::lrc::{format_timestamp, parse_lrc, LrcEntry};
use crate::common;

/// Test parsing a realistic lyric with metadata and interludes
#[test]
fn test_parse_lrc_withMetadataAndBlanks_shouldKeepTimedLinesOnly() {
    let entries = parse_lrc(common::ORIGINAL_LRC);

    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0], LrcEntry::new(1_000, "first line"));
    assert_eq!(entries[4], LrcEntry::new(12_500, "third line"));
    assert!(entries[2].is_blank());
    assert!(entries[3].is_blank());
}

/// Test that unsorted input keeps its order
#[test]
fn test_parse_lrc_withUnsortedInput_shouldNotSort() {
    let entries = parse_lrc("[00:30.000]late\n[00:10.000]early");
    let times: Vec<u64> = entries.iter().map(|e| e.time_ms).collect();
    assert_eq!(times, vec![30_000, 10_000]);
}

/// Test that malformed lines never cause errors
#[test]
fn test_parse_lrc_withOnlyGarbage_shouldReturnEmpty() {
    let content = "garbage\n[xx:yy.zzz]bad\n[00:01]no fraction\n[00:01.0000]four digits\n[00:01.00]two digits";
    assert!(parse_lrc(content).is_empty());
}

/// Test text trimming
#[test]
fn test_parse_lrc_withPaddedText_shouldTrim() {
    let entries = parse_lrc("[00:00.000]\t hello world \t");
    assert_eq!(entries[0].text, "hello world");
}

/// Test seconds above 59 are accepted as written
#[test]
fn test_parse_lrc_withLargeSeconds_shouldAddThem() {
    let entries = parse_lrc("[01:75.250]x");
    assert_eq!(entries[0].time_ms, 60_000 + 75_250);
}

/// Test formatting of entries and timestamps
#[test]
fn test_format_timestamp_withVariousValues_shouldUseFloorDivision() {
    assert_eq!(format_timestamp(59_999), "[00:59.999]");
    assert_eq!(format_timestamp(60_000), "[01:00.000]");
    assert_eq!(format_timestamp(3_599_999), "[59:59.999]");
    assert_eq!(LrcEntry::new(500, "a").to_string(), "[00:00.500]a");
}

/// Test classic Mac line endings
#[test]
fn test_parse_lrc_withCarriageReturnLineEndings_shouldParseEveryLine() {
    let content = "[ti:Old]\r[00:01.000]first\r[00:02.500]second\r[00:04.000]third";
    let entries = parse_lrc(content);

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1], LrcEntry::new(2_500, "second"));
    assert_eq!(entries[2].text, "third");
}
