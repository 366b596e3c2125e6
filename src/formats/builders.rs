/*!
 * Builders for SRT, WebVTT and plain-text output.
 *
 * Entries are renumbered sequentially from 1 regardless of their input
 * indices, and malformed entries are omitted: they carry no timing and
 * cannot be serialized into a timed format. Plain text discards timing by
 * design, for caption-free transcript export.
 */

use super::{timecode, OutputFormat, SubtitleFormat};
use crate::subtitle_document::SubtitleDocument;

/// Serialize a document into the requested output format
pub fn build(doc: &SubtitleDocument, format: OutputFormat) -> String {
    match format {
        OutputFormat::Srt => build_srt(doc),
        OutputFormat::Vtt => build_vtt(doc),
        OutputFormat::Text => build_text(doc),
    }
}

/// `index\nstart --> end\ntext` blocks joined by a blank line, with a
/// trailing blank line at end of file
pub fn build_srt(doc: &SubtitleDocument) -> String {
    let blocks: Vec<String> = doc
        .well_formed()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "{}\n{} --> {}\n{}",
                i + 1,
                timecode::format_timestamp(entry.start_time_ms, SubtitleFormat::Srt),
                timecode::format_timestamp(entry.end_time_ms, SubtitleFormat::Srt),
                entry.text
            )
        })
        .collect();

    if blocks.is_empty() {
        return String::new();
    }
    format!("{}\n\n", blocks.join("\n\n"))
}

/// Signature header, then cue blocks without numeric indices
pub fn build_vtt(doc: &SubtitleDocument) -> String {
    let blocks: Vec<String> = doc
        .well_formed()
        .map(|entry| {
            format!(
                "{} --> {}\n{}",
                timecode::format_timestamp(entry.start_time_ms, SubtitleFormat::Vtt),
                timecode::format_timestamp(entry.end_time_ms, SubtitleFormat::Vtt),
                entry.text
            )
        })
        .collect();

    if blocks.is_empty() {
        return "WEBVTT\n".to_string();
    }
    format!("WEBVTT\n\n{}\n\n", blocks.join("\n\n"))
}

/// Entry text only, one entry per line
pub fn build_text(doc: &SubtitleDocument) -> String {
    doc.well_formed()
        .map(|entry| entry.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
