/*!
 * Editor operations over a subtitle document.
 *
 * Shift, insert-with-gap-check, delete, renumber and find/replace. The
 * target set of shift and delete is the current selection, or the whole
 * document when nothing is selected; whether to confirm an apply-to-all is
 * the caller's concern, not handled here. Operations that cannot complete
 * return a distinguishable rejection instead of silently doing nothing.
 */

use log::warn;
use regex::{NoExpand, RegexBuilder};

use crate::errors::EditError;
use crate::subtitle_document::{SubtitleDocument, SubtitleEntry};

/// Minimum gap required between two entries to insert a new one between
/// them; reserves a viable duration for the new entry.
pub const MIN_INSERT_GAP_MS: u64 = 200;

/// Text given to a freshly inserted entry
const PLACEHOLDER_TEXT: &str = "[New Line]";

/// Shift the target set by `delta_ms`, clamping each timestamp at zero.
///
/// Malformed entries carry no timing and are skipped. A zero delta is
/// rejected as `ZeroShift` so the caller can tell the user nothing would
/// happen. Returns the number of shifted entries. Indices are untouched.
pub fn shift(doc: &mut SubtitleDocument, delta_ms: i64) -> Result<usize, EditError> {
    if delta_ms == 0 {
        return Err(EditError::ZeroShift);
    }

    let any_selected = doc.entries.iter().any(|e| e.selected && !e.malformed);
    let mut shifted = 0;
    for entry in doc.entries.iter_mut().filter(|e| !e.malformed) {
        if any_selected && !entry.selected {
            continue;
        }
        entry.start_time_ms = add_clamped(entry.start_time_ms, delta_ms);
        entry.end_time_ms = add_clamped(entry.end_time_ms, delta_ms);
        shifted += 1;
    }
    Ok(shifted)
}

fn add_clamped(ms: u64, delta: i64) -> u64 {
    if delta >= 0 {
        ms.saturating_add(delta as u64)
    } else {
        ms.saturating_sub(delta.unsigned_abs())
    }
}

/// Insert a placeholder entry immediately before `position`.
///
/// The new entry occupies the gap between the neighbours, leaving 1 ms on
/// each side; the gap must be at least `MIN_INSERT_GAP_MS`. Inserting
/// before the first entry is always rejected (there is no predecessor to
/// anchor the gap). The document is renumbered on success.
pub fn insert_before(doc: &mut SubtitleDocument, position: usize) -> Result<(), EditError> {
    if position == 0 {
        return Err(EditError::NoPredecessor);
    }
    if position >= doc.entries.len() {
        return Err(EditError::NoSuchEntry(position));
    }

    let prev = &doc.entries[position - 1];
    let next = &doc.entries[position];
    if prev.malformed || next.malformed {
        return Err(EditError::MalformedNeighbour);
    }

    let gap = next.start_time_ms.saturating_sub(prev.end_time_ms);
    if gap < MIN_INSERT_GAP_MS {
        return Err(EditError::InsufficientGap {
            gap_ms: gap,
            required_ms: MIN_INSERT_GAP_MS,
        });
    }

    let entry = SubtitleEntry::new(
        0, // assigned by the renumber below
        prev.end_time_ms + 1,
        next.start_time_ms - 1,
        PLACEHOLDER_TEXT.to_string(),
    );
    doc.entries.insert(position, entry);
    renumber(doc);
    Ok(())
}

/// Delete every selected entry, then renumber the remainder.
///
/// Rejected as `NothingSelected` when the selection is empty; deleting
/// "all" is expressed by selecting everything first. Returns the number of
/// removed entries.
pub fn delete_selected(doc: &mut SubtitleDocument) -> Result<usize, EditError> {
    let selected = doc.selected_count();
    if selected == 0 {
        return Err(EditError::NothingSelected);
    }
    doc.entries.retain(|e| !e.selected);
    renumber(doc);
    Ok(selected)
}

/// Reassign contiguous 1-based indices in document order.
///
/// Invoked after structural changes (insert/delete); shift and text edits
/// leave indices stable.
pub fn renumber(doc: &mut SubtitleDocument) {
    for (i, entry) in doc.entries.iter_mut().enumerate() {
        entry.index = i + 1;
    }
}

/// Case-insensitive literal find/replace over every well-formed entry's
/// text. Returns the number of entries whose text changed.
pub fn replace_all(doc: &mut SubtitleDocument, find: &str, replace: &str) -> usize {
    if find.is_empty() {
        return 0;
    }
    let pattern = match RegexBuilder::new(&regex::escape(find))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        Err(e) => {
            warn!("Could not build replace pattern for '{}': {}", find, e);
            return 0;
        }
    };

    let mut changed = 0;
    for entry in doc.entries.iter_mut().filter(|e| !e.malformed) {
        let replaced = pattern.replace_all(&entry.text, NoExpand(replace));
        if replaced != entry.text {
            entry.text = replaced.into_owned();
            changed += 1;
        }
    }
    changed
}
