/*!
 * Text presentation checks for subtitle entries.
 *
 * Line length, line count and empty text. Counts are in characters, not
 * bytes, so multi-byte scripts are measured the way a viewer reads them.
 */

use crate::subtitle_document::{Issue, IssueKind, SubtitleEntry};

/// Flag an entry where any single line exceeds `max_line_length` characters
pub fn line_length_issue(entry: &SubtitleEntry, max_line_length: usize) -> Option<Issue> {
    let too_long = entry
        .text
        .lines()
        .any(|line| line.chars().count() > max_line_length);
    if too_long {
        Some(Issue::new(
            IssueKind::LineTooLong,
            format!("High characters per line (>{max_line_length})"),
        ))
    } else {
        None
    }
}

/// Flag an entry with more than `max_lines` lines of text
pub fn line_count_issue(entry: &SubtitleEntry, max_lines: usize) -> Option<Issue> {
    let lines = entry.text.lines().count();
    if lines > max_lines {
        Some(Issue::new(
            IssueKind::TooManyLines,
            format!("More than {max_lines} lines of text"),
        ))
    } else {
        None
    }
}

/// Flag an entry with no text left after trimming
pub fn empty_text_issue(entry: &SubtitleEntry) -> Option<Issue> {
    if entry.text.trim().is_empty() {
        Some(Issue::new(IssueKind::EmptyText, "Subtitle has no text"))
    } else {
        None
    }
}
