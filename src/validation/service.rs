/*!
 * Validation service that orchestrates all checks.
 *
 * One pass over the document in sequence order. Malformed entries are
 * excluded from timing and text checks (they have no usable fields) but
 * always contribute to the syntax count. Repeated passes without any
 * mutation in between produce identical annotations.
 */

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::subtitle_document::{IssueKind, SubtitleDocument};

use super::{text, timing};

/// Thresholds for the validation checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Minimum display duration in milliseconds
    #[serde(default = "default_min_duration_ms")]
    pub min_duration_ms: u64,

    /// Maximum display duration in milliseconds
    #[serde(default = "default_max_duration_ms")]
    pub max_duration_ms: u64,

    /// Maximum characters per line
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,

    /// Maximum lines of text per entry
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,

    /// Maximum reading speed in characters per second
    #[serde(default = "default_max_cps")]
    pub max_cps: f64,

    /// Gap the repair pass leaves between an overlapping entry and its
    /// neighbour, in milliseconds
    #[serde(default = "default_overlap_pullback_ms")]
    pub overlap_pullback_ms: u64,
}

fn default_min_duration_ms() -> u64 {
    1000
}

fn default_max_duration_ms() -> u64 {
    7000
}

fn default_max_line_length() -> usize {
    42
}

fn default_max_lines() -> usize {
    2
}

fn default_max_cps() -> f64 {
    21.0
}

fn default_overlap_pullback_ms() -> u64 {
    50
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: default_min_duration_ms(),
            max_duration_ms: default_max_duration_ms(),
            max_line_length: default_max_line_length(),
            max_lines: default_max_lines(),
            max_cps: default_max_cps(),
            overlap_pullback_ms: default_overlap_pullback_ms(),
        }
    }
}

/// Aggregate issue counts over one analysis pass.
///
/// Each count is the number of entries carrying that issue kind, in
/// document order; one entry may contribute to several counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    /// Entries analyzed, malformed included
    pub total_entries: usize,
    /// Malformed entries plus entries with parser-set structural issues
    pub syntax: usize,
    pub overlap: usize,
    pub short_duration: usize,
    pub long_duration: usize,
    pub line_too_long: usize,
    pub reading_speed: usize,
    pub too_many_lines: usize,
    pub empty_text: usize,
}

impl ValidationSummary {
    /// True when no issue of any kind was found
    pub fn is_clean(&self) -> bool {
        self.total_issues() == 0
    }

    /// Total number of flagged entries across all kinds
    pub fn total_issues(&self) -> usize {
        self.syntax
            + self.overlap
            + self.short_duration
            + self.long_duration
            + self.line_too_long
            + self.reading_speed
            + self.too_many_lines
            + self.empty_text
    }
}

impl fmt::Display for ValidationSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_clean() {
            return write!(f, "No issues found");
        }
        let parts: Vec<String> = [
            (self.syntax, IssueKind::Syntax),
            (self.overlap, IssueKind::Overlap),
            (self.short_duration, IssueKind::ShortDuration),
            (self.long_duration, IssueKind::LongDuration),
            (self.line_too_long, IssueKind::LineTooLong),
            (self.reading_speed, IssueKind::ReadingSpeed),
            (self.too_many_lines, IssueKind::TooManyLines),
            (self.empty_text, IssueKind::EmptyText),
        ]
        .iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, kind)| format!("{} {}", count, kind.label()))
        .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Validator for whole documents
pub struct ValidationService {
    config: ValidationConfig,
}

impl ValidationService {
    /// Create a validator with default thresholds
    pub fn new() -> Self {
        Self {
            config: ValidationConfig::default(),
        }
    }

    /// Create a validator with custom thresholds
    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Analyze the document, annotating each entry and returning aggregate
    /// counts. Content issues are recomputed from scratch; structural
    /// issues set by the parser persist untouched.
    pub fn analyze(&self, doc: &mut SubtitleDocument) -> ValidationSummary {
        let mut summary = ValidationSummary {
            total_entries: doc.len(),
            ..Default::default()
        };

        for i in 0..doc.entries.len() {
            doc.entries[i].content_issues.clear();

            if doc.entries[i].malformed {
                summary.syntax += 1;
                continue;
            }
            if !doc.entries[i].structural_issues.is_empty() {
                summary.syntax += 1;
            }

            let next_start = doc.next_well_formed_start(i);
            let cfg = &self.config;
            let entry = &doc.entries[i];

            let mut issues = Vec::new();
            if let Some(next_start) = next_start {
                issues.extend(timing::overlap_issue(entry, next_start));
            }
            issues.extend(timing::short_duration_issue(entry, cfg.min_duration_ms));
            issues.extend(timing::long_duration_issue(entry, cfg.max_duration_ms));
            issues.extend(text::line_length_issue(entry, cfg.max_line_length));
            issues.extend(timing::reading_speed_issue(entry, cfg.max_cps));
            issues.extend(text::line_count_issue(entry, cfg.max_lines));
            issues.extend(text::empty_text_issue(entry));

            for issue in &issues {
                match issue.kind {
                    IssueKind::Overlap => summary.overlap += 1,
                    IssueKind::ShortDuration => summary.short_duration += 1,
                    IssueKind::LongDuration => summary.long_duration += 1,
                    IssueKind::LineTooLong => summary.line_too_long += 1,
                    IssueKind::ReadingSpeed => summary.reading_speed += 1,
                    IssueKind::TooManyLines => summary.too_many_lines += 1,
                    IssueKind::EmptyText => summary.empty_text += 1,
                    IssueKind::Syntax => summary.syntax += 1,
                }
            }
            doc.entries[i].content_issues = issues;
        }

        debug!(
            "Validation: {} entries, {} flagged",
            summary.total_entries,
            summary.total_issues()
        );
        summary
    }

    /// Deterministically repair the common timing issues in one pass:
    /// an overlap pulls the earlier entry's end back to `overlap_pullback_ms`
    /// before the next entry's start; a too-short duration extends the end
    /// to exactly `min_duration_ms` after the start. Text issues are never
    /// touched. Returns the number of repairs applied; callers re-run
    /// `analyze` afterwards to refresh annotations.
    pub fn fix_common_issues(&self, doc: &mut SubtitleDocument) -> usize {
        let mut repairs = 0;

        for i in 0..doc.entries.len() {
            if doc.entries[i].malformed {
                continue;
            }

            if let Some(next_start) = doc.next_well_formed_start(i) {
                if doc.entries[i].end_time_ms > next_start {
                    doc.entries[i].end_time_ms =
                        next_start.saturating_sub(self.config.overlap_pullback_ms);
                    repairs += 1;
                }
            }

            let entry = &mut doc.entries[i];
            if entry.duration_ms() < self.config.min_duration_ms {
                entry.end_time_ms = entry.start_time_ms + self.config.min_duration_ms;
                repairs += 1;
            }
        }

        if repairs > 0 {
            debug!("Repaired {} timing issues", repairs);
        }
        repairs
    }
}

impl Default for ValidationService {
    fn default() -> Self {
        Self::new()
    }
}
