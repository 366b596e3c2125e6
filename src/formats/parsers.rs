/*!
 * Parsers for SRT, WebVTT and ASS/SSA input.
 *
 * Every tool goes through these parsers; behavior differs only by the
 * explicit parse mode:
 *
 * - **Strict** (conversion paths): the first structurally bad block aborts
 *   the whole parse. No partial document is ever returned, so a lossless
 *   conversion can never silently drop entries.
 * - **Tolerant** (editor and checker paths): a block whose time range
 *   cannot be located or read is kept as a malformed entry carrying its raw
 *   text, so the user can see and act on broken input.
 *
 * Indices are recovered when absent or garbled: the 1-based block position
 * stands in for a missing index. This is a deliberate leniency, not an
 * oversight; builders renumber on output anyway.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::{timecode, SubtitleFormat};
use crate::errors::ParseError;
use crate::styling;
use crate::subtitle_document::{SubtitleDocument, SubtitleEntry};

/// Parse mode selected by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Abort the whole parse on the first structural defect
    Strict,
    /// Keep malformed blocks as displayable entries
    Tolerant,
}

/// Options shared by all format parsers
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Strict or tolerant handling of malformed blocks
    pub mode: ParseMode,
    /// Remove `{...}` override sequences from ASS dialogue text
    pub strip_override_tags: bool,
}

impl ParseOptions {
    /// Options for lossless conversion paths
    pub fn strict() -> Self {
        ParseOptions {
            mode: ParseMode::Strict,
            strip_override_tags: false,
        }
    }

    /// Options for interactive editor and checker paths
    pub fn tolerant() -> Self {
        ParseOptions {
            mode: ParseMode::Tolerant,
            strip_override_tags: false,
        }
    }

    /// Toggle removal of ASS styling override sequences
    pub fn with_override_stripping(mut self, strip: bool) -> Self {
        self.strip_override_tags = strip;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::tolerant()
    }
}

static BLOCK_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("Invalid block separator regex"));

static SRT_TIME_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}:\d{2}:\d{2},\d{3})\s*-->\s*(\d{2}:\d{2}:\d{2},\d{3})")
        .expect("Invalid SRT time range regex")
});

static VTT_TIME_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}:\d{2}:\d{2}\.\d{3})\s*-->\s*(\d{2}:\d{2}:\d{2}\.\d{3})")
        .expect("Invalid WebVTT time range regex")
});

/// Parse raw subtitle text into a document.
///
/// Empty input yields an empty document, not an error.
pub fn parse(
    content: &str,
    format: SubtitleFormat,
    options: &ParseOptions,
) -> Result<SubtitleDocument, ParseError> {
    let entries = match format {
        SubtitleFormat::Srt => parse_srt(content, options)?,
        SubtitleFormat::Vtt => parse_vtt(content, options)?,
        SubtitleFormat::Ass => parse_ass(content, options)?,
    };
    Ok(SubtitleDocument::from_entries(entries))
}

/// Split block-structured input on blank lines, dropping separator
/// artifacts (whitespace-only blocks).
fn split_blocks(content: &str) -> Vec<String> {
    let normalized = content.replace('\r', "");
    BLOCK_SEPARATOR
        .split(normalized.trim())
        .filter(|block| !block.trim().is_empty())
        .map(|block| block.to_string())
        .collect()
}

fn parse_srt(content: &str, options: &ParseOptions) -> Result<Vec<SubtitleEntry>, ParseError> {
    let mut entries = Vec::new();
    for (i, block) in split_blocks(content).iter().enumerate() {
        let ordinal = i + 1;
        let lines: Vec<&str> = block.lines().collect();
        match options.mode {
            ParseMode::Strict => entries.push(parse_srt_block_strict(ordinal, &lines)?),
            ParseMode::Tolerant => entries.push(parse_srt_block_tolerant(ordinal, block, &lines)),
        }
    }
    Ok(entries)
}

/// Strict SRT block: index line, timestamp line, then text
fn parse_srt_block_strict(ordinal: usize, lines: &[&str]) -> Result<SubtitleEntry, ParseError> {
    if lines.len() < 2 {
        return Err(ParseError::MalformedBlock {
            ordinal,
            line: lines.first().unwrap_or(&"").to_string(),
            message: "block has too few lines".to_string(),
        });
    }

    let time_line = lines[1].trim();
    let caps = SRT_TIME_RANGE.captures(time_line).ok_or_else(|| ParseError::MalformedBlock {
        ordinal,
        line: time_line.to_string(),
        message: "timestamp line does not match the SRT pattern".to_string(),
    })?;

    let start = timecode::parse_timestamp(&caps[1], SubtitleFormat::Srt)?;
    let end = timecode::parse_timestamp(&caps[2], SubtitleFormat::Srt)?;

    let index = lines[0].trim().parse().unwrap_or(ordinal);
    let text = lines[2..].join("\n").trim().to_string();

    let mut entry = SubtitleEntry::new(index, start, end, text);
    if end <= start {
        entry.push_structural("End time is before or same as start time");
    }
    Ok(entry)
}

/// Tolerant SRT block: locate the time range anywhere in the block and
/// recover what can be recovered
fn parse_srt_block_tolerant(position: usize, block: &str, lines: &[&str]) -> SubtitleEntry {
    if lines.len() < 2 {
        return SubtitleEntry::new_malformed(
            position,
            block.to_string(),
            "Block is empty or has too few lines",
        );
    }

    let Some(time_line_idx) = lines.iter().position(|line| line.contains("-->")) else {
        return SubtitleEntry::new_malformed(
            position,
            block.to_string(),
            "Timestamp line missing or malformed",
        );
    };

    let time_line = lines[time_line_idx];
    let Some(caps) = SRT_TIME_RANGE.captures(time_line) else {
        return SubtitleEntry::new_malformed(
            position,
            block.to_string(),
            format!("Invalid timestamp format: {}", time_line.trim()),
        );
    };

    let (Ok(start), Ok(end)) = (
        timecode::parse_timestamp(&caps[1], SubtitleFormat::Srt),
        timecode::parse_timestamp(&caps[2], SubtitleFormat::Srt),
    ) else {
        return SubtitleEntry::new_malformed(
            position,
            block.to_string(),
            format!("Invalid timestamp format: {}", time_line.trim()),
        );
    };

    // Recovered-index policy: fall back to the block position
    let index = lines[0].trim().parse().unwrap_or(position);
    let text = lines[time_line_idx + 1..].join("\n").trim().to_string();

    let mut entry = SubtitleEntry::new(index, start, end, text);
    if end <= start {
        entry.push_structural("End time is before or same as start time");
    }
    let first_line_is_index = lines[0].trim().parse::<usize>().is_ok();
    if time_line_idx > 1 || (time_line_idx == 1 && !first_line_is_index) {
        entry.push_structural("Text or invalid index found before the timestamp");
    }
    entry
}

fn parse_vtt(content: &str, options: &ParseOptions) -> Result<Vec<SubtitleEntry>, ParseError> {
    let blocks = split_blocks(content);

    // Optional signature block; real cues never start with the magic word
    let skip = blocks
        .first()
        .map(|b| b.trim_start().to_uppercase().starts_with("WEBVTT"))
        .unwrap_or(false) as usize;

    let mut entries = Vec::new();
    for (i, block) in blocks[skip..].iter().enumerate() {
        let ordinal = i + 1;
        let lines: Vec<&str> = block.lines().collect();

        // Cue identifiers and settings lines before the arrow are ignored
        let time_line_idx = lines.iter().position(|line| line.contains("-->"));
        let Some(time_line_idx) = time_line_idx else {
            match options.mode {
                ParseMode::Strict => {
                    return Err(ParseError::MalformedBlock {
                        ordinal,
                        line: lines.first().unwrap_or(&"").to_string(),
                        message: "no time range line in cue block".to_string(),
                    });
                }
                ParseMode::Tolerant => {
                    entries.push(SubtitleEntry::new_malformed(
                        ordinal,
                        block.to_string(),
                        "Time range line missing",
                    ));
                    continue;
                }
            }
        };

        let time_line = lines[time_line_idx];
        let parsed = VTT_TIME_RANGE.captures(time_line).and_then(|caps| {
            let start = timecode::parse_timestamp(&caps[1], SubtitleFormat::Vtt).ok()?;
            let end = timecode::parse_timestamp(&caps[2], SubtitleFormat::Vtt).ok()?;
            Some((start, end))
        });
        let Some((start, end)) = parsed else {
            match options.mode {
                ParseMode::Strict => {
                    return Err(ParseError::MalformedBlock {
                        ordinal,
                        line: time_line.to_string(),
                        message: "time range does not match the WebVTT pattern".to_string(),
                    });
                }
                ParseMode::Tolerant => {
                    entries.push(SubtitleEntry::new_malformed(
                        ordinal,
                        block.to_string(),
                        format!("Invalid time range: {}", time_line.trim()),
                    ));
                    continue;
                }
            }
        };

        let text = lines[time_line_idx + 1..].join("\n").trim().to_string();
        let mut entry = SubtitleEntry::new(ordinal, start, end, text);
        if end <= start {
            entry.push_structural("End time is before or same as start time");
        }
        entries.push(entry);
    }
    Ok(entries)
}

fn parse_ass(content: &str, options: &ParseOptions) -> Result<Vec<SubtitleEntry>, ParseError> {
    let normalized = content.replace('\r', "");
    let mut entries = Vec::new();

    let dialogue_lines = normalized
        .lines()
        .filter(|line| line.trim_start().starts_with("Dialogue:"));

    for (i, line) in dialogue_lines.enumerate() {
        let ordinal = i + 1;
        let fields: Vec<&str> = line.split(',').collect();

        // Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
        if fields.len() < 10 {
            match options.mode {
                ParseMode::Strict => {
                    return Err(ParseError::MalformedBlock {
                        ordinal,
                        line: line.to_string(),
                        message: "dialogue line has fewer than 10 comma-separated fields"
                            .to_string(),
                    });
                }
                ParseMode::Tolerant => {
                    entries.push(SubtitleEntry::new_malformed(
                        ordinal,
                        line.to_string(),
                        "Dialogue line has too few fields",
                    ));
                    continue;
                }
            }
        }

        let parsed = timecode::parse_timestamp(fields[1], SubtitleFormat::Ass).and_then(|start| {
            timecode::parse_timestamp(fields[2], SubtitleFormat::Ass).map(|end| (start, end))
        });
        let (start, end) = match parsed {
            Ok(range) => range,
            Err(e) => match options.mode {
                ParseMode::Strict => return Err(ParseError::Timestamp(e)),
                ParseMode::Tolerant => {
                    entries.push(SubtitleEntry::new_malformed(
                        ordinal,
                        line.to_string(),
                        e.to_string(),
                    ));
                    continue;
                }
            },
        };

        // The text field may itself contain commas; rejoin, never truncate
        let mut text = fields[9..].join(",");
        if options.strip_override_tags {
            text = styling::strip_override_tags(&text);
        }
        let text = text.replace("\\N", "\n").trim().to_string();

        let mut entry = SubtitleEntry::new(ordinal, start, end, text);
        if end <= start {
            entry.push_structural("End time is before or same as start time");
        }
        entries.push(entry);
    }
    Ok(entries)
}
