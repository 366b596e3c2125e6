/*!
 * Removal of hearing-impaired annotations and inline style tags.
 *
 * All removals are regex-based and non-greedy. Spans never cross line
 * breaks. Nested or unmatched delimiters are not specially handled: a
 * nested `[a [b] c]` loses `[a [b]` and keeps ` c]`. The behavior is
 * deterministic and covered by tests; callers wanting confirmation dialogs
 * before these irreversible edits provide them at their own layer.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::subtitle_document::SubtitleDocument;

static BRACKET_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[.*?\]").expect("Invalid bracket span regex"));

static PAREN_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(.*?\)").expect("Invalid parenthesis span regex"));

static ANGLE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<.*?>").expect("Invalid style tag regex"));

static OVERRIDE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{.*?\}").expect("Invalid override tag regex"));

static BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("Invalid blank line regex"));

/// Remove `[...]` and `(...)` hearing-impaired annotations, collapse the
/// blank lines left behind and trim the result.
pub fn strip_hearing_impaired(text: &str) -> String {
    let stripped = BRACKET_SPAN.replace_all(text, "");
    let stripped = PAREN_SPAN.replace_all(&stripped, "");
    let collapsed = BLANK_LINES.replace_all(&stripped, "\n");
    collapsed.trim().to_string()
}

/// Remove `<...>` style tags without distinguishing tag types
pub fn strip_style_tags(text: &str) -> String {
    ANGLE_TAG.replace_all(text, "").trim().to_string()
}

/// Remove ASS `{...}` styling override sequences
pub fn strip_override_tags(text: &str) -> String {
    OVERRIDE_TAG.replace_all(text, "").to_string()
}

/// Strip hearing-impaired annotations from every well-formed entry.
/// Returns the number of entries whose text changed.
pub fn strip_hearing_impaired_from(doc: &mut SubtitleDocument) -> usize {
    apply(doc, strip_hearing_impaired)
}

/// Strip style tags from every well-formed entry.
/// Returns the number of entries whose text changed.
pub fn strip_style_tags_from(doc: &mut SubtitleDocument) -> usize {
    apply(doc, strip_style_tags)
}

fn apply(doc: &mut SubtitleDocument, transform: fn(&str) -> String) -> usize {
    let mut changed = 0;
    for entry in doc.entries.iter_mut().filter(|e| !e.malformed) {
        let stripped = transform(&entry.text);
        if stripped != entry.text {
            entry.text = stripped;
            changed += 1;
        }
    }
    changed
}
