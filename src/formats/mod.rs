/*!
 * Subtitle text formats.
 *
 * One timestamp codec, one parser per input format and one builder per
 * output format, shared by every tool. Parse behavior differs only by the
 * explicit strict/tolerant mode flag.
 *
 * # Architecture
 *
 * - `timecode`: milliseconds <-> textual timestamps
 * - `parsers`: SRT/WebVTT/ASS input, strict and tolerant modes
 * - `builders`: SRT/WebVTT/plain-text output
 */

pub mod builders;
pub mod parsers;
pub mod timecode;

pub use builders::{build, build_srt, build_text, build_vtt};
pub use parsers::{parse, ParseMode, ParseOptions};

use crate::errors::{BuildError, ParseError};

/// Input formats understood by the parsers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleFormat {
    /// SubRip, `HH:MM:SS,mmm` timestamps, blank-line separated blocks
    Srt,
    /// WebVTT, `HH:MM:SS.mmm` timestamps, optional signature header
    Vtt,
    /// Advanced SubStation Alpha, `H:MM:SS.cc` timestamps, `Dialogue:` lines
    Ass,
}

impl SubtitleFormat {
    /// Lowercase format name
    pub fn name(&self) -> &'static str {
        match self {
            SubtitleFormat::Srt => "srt",
            SubtitleFormat::Vtt => "vtt",
            SubtitleFormat::Ass => "ass",
        }
    }

    /// Resolve a format from a file extension or format tag.
    /// `.sub` files are treated as SubRip text, `.ssa` as ASS.
    pub fn from_name(name: &str) -> Result<Self, ParseError> {
        match name.to_lowercase().as_str() {
            "srt" | "sub" => Ok(SubtitleFormat::Srt),
            "vtt" | "webvtt" => Ok(SubtitleFormat::Vtt),
            "ass" | "ssa" => Ok(SubtitleFormat::Ass),
            other => Err(ParseError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Output formats produced by the builders.
///
/// ASS output is not implemented; requesting it yields
/// `BuildError::UnsupportedFormat`, never a silent substitute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// SubRip blocks with renumbered indices
    Srt,
    /// WebVTT with signature header, no indices
    Vtt,
    /// Entry text only, timing discarded
    Text,
}

impl OutputFormat {
    /// File extension for the produced text
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Srt => "srt",
            OutputFormat::Vtt => "vtt",
            OutputFormat::Text => "txt",
        }
    }

    /// Resolve an output format from a name or extension
    pub fn from_name(name: &str) -> Result<Self, BuildError> {
        match name.to_lowercase().as_str() {
            "srt" => Ok(OutputFormat::Srt),
            "vtt" | "webvtt" => Ok(OutputFormat::Vtt),
            "txt" | "text" => Ok(OutputFormat::Text),
            other => Err(BuildError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}
