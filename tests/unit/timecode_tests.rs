/*!
 * Tests for the timestamp codec
 */

use subwork::formats::timecode::{format_timestamp, parse_timestamp};
use subwork::SubtitleFormat;

/// Round trip across the representable range for millisecond formats
#[test]
fn test_roundTrip_withMillisecondFormats_shouldBeExactAcrossRange() {
    // A spread of values up to just under 100 hours
    let samples = [
        0u64,
        1,
        999,
        1_000,
        59_999,
        60_000,
        3_599_999,
        3_600_000,
        86_399_999,
        359_999_999,
    ];
    for &ms in &samples {
        for &format in &[SubtitleFormat::Srt, SubtitleFormat::Vtt] {
            let text = format_timestamp(ms, format);
            assert_eq!(
                parse_timestamp(&text, format).unwrap(),
                ms,
                "round trip failed for {} as {}",
                ms,
                format
            );
        }
    }
}

/// ASS keeps centisecond precision only
#[test]
fn test_roundTrip_withAss_shouldLoseSub10msOnly() {
    for &ms in &[0u64, 9, 10, 1_234, 9_999, 359_999_999] {
        let text = format_timestamp(ms, SubtitleFormat::Ass);
        let reparsed = parse_timestamp(&text, SubtitleFormat::Ass).unwrap();
        assert_eq!(reparsed, ms / 10 * 10);
        assert!(ms - reparsed < 10);
    }
}

/// Separator conventions are per format, not interchangeable
#[test]
fn test_parseTimestamp_withForeignSeparator_shouldError() {
    assert!(parse_timestamp("00:00:01.000", SubtitleFormat::Srt).is_err());
    assert!(parse_timestamp("00:00:01,000", SubtitleFormat::Vtt).is_err());
    assert!(parse_timestamp("0:00:01,00", SubtitleFormat::Ass).is_err());
}

/// The error names the token and the expected format
#[test]
fn test_parseTimestamp_error_shouldIdentifyToken() {
    let err = parse_timestamp("garbage", SubtitleFormat::Srt).unwrap_err();
    assert_eq!(err.token, "garbage");
    assert_eq!(err.format, "srt");
}

/// ASS hours are a single digit for small values and grow as needed
#[test]
fn test_formatTimestamp_withAss_shouldUseSingleDigitHours() {
    assert_eq!(format_timestamp(0, SubtitleFormat::Ass), "0:00:00.00");
    assert_eq!(
        format_timestamp(10 * 3_600_000, SubtitleFormat::Ass),
        "10:00:00.00"
    );
}
