/*!
 * Timestamp codec.
 *
 * Converts between a canonical millisecond integer and each format's
 * textual representation:
 *
 * - SRT `HH:MM:SS,mmm`
 * - WebVTT `HH:MM:SS.mmm`
 * - ASS `H:MM:SS.cc`
 *
 * ASS carries only centisecond precision; a parsed centisecond value is
 * treated as the start of its 10 ms window, so SRT/WebVTT round-trip
 * exactly while ASS round-trips to the nearest 10 ms.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::SubtitleFormat;
use crate::errors::TimestampError;

static SRT_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}):(\d{2}):(\d{2}),(\d{3})$").expect("Invalid SRT timestamp regex")
});

static VTT_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}):(\d{2}):(\d{2})\.(\d{3})$").expect("Invalid WebVTT timestamp regex")
});

static ASS_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2}):(\d{2})\.(\d{2})$").expect("Invalid ASS timestamp regex")
});

/// Parse a single timestamp token into milliseconds.
///
/// The token must match the exact pattern of `format`; minutes and seconds
/// above 59 are rejected even when the digit grouping matches.
pub fn parse_timestamp(token: &str, format: SubtitleFormat) -> Result<u64, TimestampError> {
    let token = token.trim();
    let pattern = match format {
        SubtitleFormat::Srt => &SRT_TIMESTAMP,
        SubtitleFormat::Vtt => &VTT_TIMESTAMP,
        SubtitleFormat::Ass => &ASS_TIMESTAMP,
    };

    let caps = pattern.captures(token).ok_or_else(|| TimestampError {
        token: token.to_string(),
        format: format.name(),
    })?;

    // The regex guarantees each group is a short digit run
    let field = |i: usize| -> u64 { caps[i].parse().unwrap_or(0) };
    let (hours, minutes, seconds, frac) = (field(1), field(2), field(3), field(4));

    if minutes >= 60 || seconds >= 60 {
        return Err(TimestampError {
            token: token.to_string(),
            format: format.name(),
        });
    }

    let frac_ms = match format {
        // Centiseconds mark the start of their 10 ms window
        SubtitleFormat::Ass => frac * 10,
        _ => frac,
    };

    Ok((hours * 3600 + minutes * 60 + seconds) * 1000 + frac_ms)
}

/// Format milliseconds as a timestamp for `format`.
///
/// Never fails; output is zero-padded to the format's fixed widths. ASS
/// truncates to centiseconds.
pub fn format_timestamp(ms: u64, format: SubtitleFormat) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;

    match format {
        SubtitleFormat::Srt => {
            format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, ms % 1_000)
        }
        SubtitleFormat::Vtt => {
            format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, ms % 1_000)
        }
        SubtitleFormat::Ass => {
            format!("{}:{:02}:{:02}.{:02}", hours, minutes, seconds, (ms % 1_000) / 10)
        }
    }
}
