/*!
 * Timing checks for subtitle entries.
 *
 * Overlap with the following entry, duration bounds and reading speed.
 * All checks are pure; they look at one entry (plus the neighbour's start
 * time for overlap) and return the issue to attach, if any.
 */

use crate::subtitle_document::{Issue, IssueKind, SubtitleEntry};

/// Flag an entry whose end time runs strictly past the next entry's start.
/// Touching entries (`end == next start`) are fine.
pub fn overlap_issue(entry: &SubtitleEntry, next_start_ms: u64) -> Option<Issue> {
    if entry.end_time_ms > next_start_ms {
        Some(Issue::new(IssueKind::Overlap, "Overlaps with next subtitle"))
    } else {
        None
    }
}

/// Flag a duration below `min_duration_ms`
pub fn short_duration_issue(entry: &SubtitleEntry, min_duration_ms: u64) -> Option<Issue> {
    let duration = entry.duration_ms();
    if duration < min_duration_ms {
        Some(Issue::new(
            IssueKind::ShortDuration,
            format!("Short duration ({duration}ms)"),
        ))
    } else {
        None
    }
}

/// Flag a duration above `max_duration_ms`
pub fn long_duration_issue(entry: &SubtitleEntry, max_duration_ms: u64) -> Option<Issue> {
    let duration = entry.duration_ms();
    if duration > max_duration_ms {
        Some(Issue::new(
            IssueKind::LongDuration,
            format!("Long duration ({:.1}s)", duration as f64 / 1000.0),
        ))
    } else {
        None
    }
}

/// Reading speed in characters per second: non-whitespace characters over
/// display seconds. Zero when the duration is zero.
pub fn characters_per_second(entry: &SubtitleEntry) -> f64 {
    let duration_ms = entry.duration_ms();
    if duration_ms == 0 {
        return 0.0;
    }
    let chars = entry.text.chars().filter(|c| !c.is_whitespace()).count();
    chars as f64 / (duration_ms as f64 / 1000.0)
}

/// Flag a reading speed strictly above `max_cps`
pub fn reading_speed_issue(entry: &SubtitleEntry, max_cps: f64) -> Option<Issue> {
    let cps = characters_per_second(entry);
    if cps > max_cps {
        Some(Issue::new(
            IssueKind::ReadingSpeed,
            format!("High reading speed ({cps:.1} CPS)"),
        ))
    } else {
        None
    }
}
