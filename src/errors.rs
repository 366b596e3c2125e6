/*!
 * Error types for the subwork crate.
 *
 * This module contains custom error types for the parsing, building and
 * editing layers, using the thiserror crate for ergonomic error definitions.
 * Collaborator-level code (file IO, process invocation) uses anyhow and
 * converts at the boundary.
 */

use thiserror::Error;

/// A single timestamp token that does not match its format's pattern.
///
/// Always fatal for the operation that contains the token; tolerant parsing
/// converts it into a syntax annotation on the entry instead of propagating.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {format} timestamp: '{token}'")]
pub struct TimestampError {
    /// The offending token as it appeared in the input
    pub token: String,
    /// Name of the format whose pattern was expected
    pub format: &'static str,
}

/// Errors raised by strict-mode parsing.
///
/// Strict mode aborts the whole parse on the first structural defect; no
/// partial document is ever returned. Tolerant mode records the same defects
/// as annotations on malformed entries and never raises.
#[derive(Error, Debug)]
pub enum ParseError {
    /// A block failed structural expectations. Carries the 1-based block
    /// ordinal and the offending line so callers can surface it verbatim.
    #[error("block {ordinal}: {message}: '{line}'")]
    MalformedBlock {
        /// 1-based position of the block in the input
        ordinal: usize,
        /// The line that failed to parse
        line: String,
        /// What was expected
        message: String,
    },

    /// A timestamp token failed inside an otherwise well-shaped block
    #[error(transparent)]
    Timestamp(#[from] TimestampError),

    /// No parser implements the requested input format
    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),
}

/// Errors raised when resolving an output format for the builders
#[derive(Error, Debug)]
pub enum BuildError {
    /// No builder implements the requested output format
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),
}

/// Rejections from editor operations.
///
/// All of these are recoverable: the caller surfaces them and the user
/// adjusts the selection or the timing. None of them is a silent no-op.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// A shift of zero milliseconds was requested
    #[error("a shift of 0 ms has no effect")]
    ZeroShift,

    /// Delete was requested with nothing selected
    #[error("no entries selected")]
    NothingSelected,

    /// Insert was requested before the first entry
    #[error("cannot insert before the first entry")]
    NoPredecessor,

    /// Insert was requested at a position that does not exist
    #[error("no entry at position {0}")]
    NoSuchEntry(usize),

    /// One of the entries anchoring the insert gap is malformed
    #[error("cannot anchor a new entry against a malformed neighbour")]
    MalformedNeighbour,

    /// The gap between the anchoring entries is too small
    #[error("gap of {gap_ms} ms between entries is too small (need {required_ms} ms)")]
    InsufficientGap {
        /// Available gap in milliseconds
        gap_ms: u64,
        /// Minimum required gap in milliseconds
        required_ms: u64,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from parsing subtitle text
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error from building subtitle text
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// A rejected editor operation
    #[error("Edit rejected: {0}")]
    Edit(#[from] EditError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
