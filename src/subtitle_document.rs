use std::fmt;

// @module: Subtitle document data model

// @struct: Single diagnostic attached to an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    // @field: Issue category
    pub kind: IssueKind,

    // @field: Human-readable description
    pub message: String,
}

impl Issue {
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Issue {
            kind,
            message: message.into(),
        }
    }
}

/// Categories of diagnosable defects.
///
/// `Syntax` issues are structural: they are set once by the parser and never
/// recomputed. Every other kind is a content issue, cleared and re-derived on
/// each validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// Block could not be parsed, or timing fields are inconsistent
    Syntax,
    /// End time runs past the next entry's start time
    Overlap,
    /// Entry is displayed for less than the minimum duration
    ShortDuration,
    /// Entry is displayed for more than the maximum duration
    LongDuration,
    /// At least one text line exceeds the line-length limit
    LineTooLong,
    /// Reading speed in characters per second exceeds the limit
    ReadingSpeed,
    /// More lines of text than the display allows
    TooManyLines,
    /// No text left after trimming
    EmptyText,
}

impl IssueKind {
    /// Short label used in summaries and reports
    pub fn label(&self) -> &'static str {
        match self {
            IssueKind::Syntax => "syntax",
            IssueKind::Overlap => "overlap",
            IssueKind::ShortDuration => "short duration",
            IssueKind::LongDuration => "long duration",
            IssueKind::LineTooLong => "long line",
            IssueKind::ReadingSpeed => "high CPS",
            IssueKind::TooManyLines => "too many lines",
            IssueKind::EmptyText => "empty text",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    // @field: Display/ordering label, 1-based
    pub index: usize,

    // @field: Start time in ms from media start
    pub start_time_ms: u64,

    // @field: End time in ms from media start
    pub end_time_ms: u64,

    // @field: Subtitle text, lines joined by '\n'
    pub text: String,

    // @field: Transient selection flag, never serialized
    pub selected: bool,

    // @field: Parser-set issues, persist across validation passes
    pub structural_issues: Vec<Issue>,

    // @field: Validator-set issues, recomputed on every pass
    pub content_issues: Vec<Issue>,

    // @field: True when no timestamp line could be parsed
    pub malformed: bool,

    // @field: Raw block text, kept for malformed entries only
    pub raw: String,
}

impl SubtitleEntry {
    /// Create a well-formed entry
    pub fn new(index: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Self {
        SubtitleEntry {
            index,
            start_time_ms,
            end_time_ms,
            text,
            selected: false,
            structural_issues: Vec::new(),
            content_issues: Vec::new(),
            malformed: false,
            raw: String::new(),
        }
    }

    /// Create a malformed entry that carries only its raw block text.
    /// Timing fields are zero and meaningless.
    pub fn new_malformed(index: usize, raw: String, message: impl Into<String>) -> Self {
        SubtitleEntry {
            index,
            start_time_ms: 0,
            end_time_ms: 0,
            text: String::new(),
            selected: false,
            structural_issues: vec![Issue::new(IssueKind::Syntax, message)],
            content_issues: Vec::new(),
            malformed: true,
            raw,
        }
    }

    /// Record a parser-detected structural defect
    pub fn push_structural(&mut self, message: impl Into<String>) {
        self.structural_issues.push(Issue::new(IssueKind::Syntax, message));
    }

    /// Display duration; zero when the time range is inverted
    pub fn duration_ms(&self) -> u64 {
        self.end_time_ms.saturating_sub(self.start_time_ms)
    }

    /// All issues currently attached, structural first
    pub fn all_issues(&self) -> impl Iterator<Item = &Issue> {
        self.structural_issues.iter().chain(self.content_issues.iter())
    }

    /// True when any issue of any category is attached
    pub fn has_issues(&self) -> bool {
        !self.structural_issues.is_empty() || !self.content_issues.is_empty()
    }
}

/// Ordered sequence of subtitle entries.
///
/// Order is playback order and serialization order. Entries may overlap in
/// time; overlap is a diagnosable issue, not a structural violation. The
/// document is owned exclusively by one session, there is no internal
/// locking; distinct documents are safe to process from distinct threads.
#[derive(Debug, Clone, Default)]
pub struct SubtitleDocument {
    /// Entries in playback order
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleDocument {
    /// Create an empty document
    pub fn new() -> Self {
        SubtitleDocument { entries: Vec::new() }
    }

    /// Wrap a parsed entry sequence
    pub fn from_entries(entries: Vec<SubtitleEntry>) -> Self {
        SubtitleDocument { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries that parsed with a usable time range
    pub fn well_formed(&self) -> impl Iterator<Item = &SubtitleEntry> {
        self.entries.iter().filter(|e| !e.malformed)
    }

    /// Number of entries that could not be parsed
    pub fn malformed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.malformed).count()
    }

    /// Number of currently selected entries
    pub fn selected_count(&self) -> usize {
        self.entries.iter().filter(|e| e.selected).count()
    }

    /// Select or deselect every entry
    pub fn select_all(&mut self, selected: bool) {
        for entry in &mut self.entries {
            entry.selected = selected;
        }
    }

    /// Start time of the next well-formed entry after `position`, if any.
    /// Malformed entries carry no timing and are skipped when looking for
    /// the overlap neighbour.
    pub fn next_well_formed_start(&self, position: usize) -> Option<u64> {
        self.entries[position + 1..]
            .iter()
            .find(|e| !e.malformed)
            .map(|e| e.start_time_ms)
    }
}

impl fmt::Display for SubtitleDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} entries ({} malformed)",
            self.entries.len(),
            self.malformed_count()
        )
    }
}
