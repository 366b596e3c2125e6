/*!
 * Tests for editor operations through the public API
 */

use subwork::{editor, EditError, ParseOptions, SubtitleDocument, SubtitleEntry, SubtitleFormat};

fn doc(ranges: &[(u64, u64)]) -> SubtitleDocument {
    SubtitleDocument::from_entries(
        ranges
            .iter()
            .enumerate()
            .map(|(i, &(s, e))| SubtitleEntry::new(i + 1, s, e, format!("Entry {}", i + 1)))
            .collect(),
    )
}

/// Zero-delta shift is a signalled rejection, not a silent no-op
#[test]
fn test_shift_withZeroDelta_shouldSignalNothingToDo() {
    let mut d = doc(&[(0, 1000), (2000, 3000)]);
    assert_eq!(editor::shift(&mut d, 0), Err(EditError::ZeroShift));
}

/// Shifting forward then backward restores the original timestamps exactly
#[test]
fn test_shift_roundTrip_shouldRestoreTimestamps() {
    let mut d = doc(&[(1000, 2000), (2500, 3000)]);
    editor::shift(&mut d, 5000).unwrap();
    assert_eq!(d.entries[0].start_time_ms, 6000);
    editor::shift(&mut d, -5000).unwrap();
    assert_eq!(d.entries[0].start_time_ms, 1000);
    assert_eq!(d.entries[0].end_time_ms, 2000);
    assert_eq!(d.entries[1].start_time_ms, 2500);
    assert_eq!(d.entries[1].end_time_ms, 3000);
}

/// A selection scopes the shift; an empty selection means everything
#[test]
fn test_shift_selectionScoping_shouldTargetSelectedOrAll() {
    let mut d = doc(&[(1000, 2000), (3000, 4000), (5000, 6000)]);
    d.entries[0].selected = true;
    d.entries[2].selected = true;
    assert_eq!(editor::shift(&mut d, 100).unwrap(), 2);
    assert_eq!(d.entries[0].start_time_ms, 1100);
    assert_eq!(d.entries[1].start_time_ms, 3000);
    assert_eq!(d.entries[2].start_time_ms, 5100);

    d.select_all(false);
    assert_eq!(editor::shift(&mut d, 100).unwrap(), 3);
}

/// Malformed entries have no timing to shift
#[test]
fn test_shift_shouldSkipMalformedEntries() {
    let mut d = doc(&[(1000, 2000)]);
    d.entries.push(SubtitleEntry::new_malformed(
        2,
        "junk".to_string(),
        "Timestamp line missing",
    ));
    assert_eq!(editor::shift(&mut d, 500).unwrap(), 1);
    assert_eq!(d.entries[1].start_time_ms, 0);
}

/// Insert before the first entry is always rejected
#[test]
fn test_insertBefore_first_shouldBeRejected() {
    let mut d = doc(&[(0, 1000), (2000, 3000)]);
    assert_eq!(editor::insert_before(&mut d, 0), Err(EditError::NoPredecessor));
    assert_eq!(d.len(), 2);
}

/// 199ms gap rejected, 200ms gap accepted
#[test]
fn test_insertBefore_gapBoundary_shouldBeExact() {
    let mut rejected = doc(&[(0, 1000), (1199, 2000)]);
    match editor::insert_before(&mut rejected, 1) {
        Err(EditError::InsufficientGap { gap_ms, required_ms }) => {
            assert_eq!(gap_ms, 199);
            assert_eq!(required_ms, 200);
        }
        other => panic!("expected gap rejection, got {:?}", other),
    }

    let mut accepted = doc(&[(0, 1000), (1200, 2000)]);
    editor::insert_before(&mut accepted, 1).unwrap();
    assert_eq!(accepted.len(), 3);
    let inserted = &accepted.entries[1];
    assert_eq!(inserted.start_time_ms, 1001);
    assert_eq!(inserted.end_time_ms, 1199);
    assert_eq!(inserted.index, 2);
    assert_eq!(accepted.entries[2].index, 3);
}

/// Delete with renumber leaves contiguous indices for any selection subset
#[test]
fn test_deleteSelected_subsets_shouldRenumberContiguously() {
    // Delete the middle entry
    let mut d = doc(&[(0, 1000), (2000, 3000), (4000, 5000)]);
    d.entries[1].selected = true;
    assert_eq!(editor::delete_selected(&mut d).unwrap(), 1);
    let indices: Vec<usize> = d.entries.iter().map(|e| e.index).collect();
    assert_eq!(indices, vec![1, 2]);

    // Delete everything
    let mut d = doc(&[(0, 1000), (2000, 3000)]);
    d.select_all(true);
    assert_eq!(editor::delete_selected(&mut d).unwrap(), 2);
    assert!(d.is_empty());

    // Delete nothing is a rejection
    let mut d = doc(&[(0, 1000)]);
    assert_eq!(editor::delete_selected(&mut d), Err(EditError::NothingSelected));
}

/// The full end-to-end scenario: parse, shift, rebuild
#[test]
fn test_endToEnd_parseShiftBuild_shouldRenumberAndRestoreCommas() {
    let input = "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:02,500 --> 00:00:03,000\nWorld\n\n";
    let mut document =
        subwork::parse(input, SubtitleFormat::Srt, &ParseOptions::tolerant()).unwrap();
    assert_eq!(document.len(), 2);

    assert_eq!(editor::shift(&mut document, 500).unwrap(), 2);
    assert_eq!(document.entries[0].start_time_ms, 1500);
    assert_eq!(document.entries[0].end_time_ms, 2500);
    assert_eq!(document.entries[1].start_time_ms, 3000);
    assert_eq!(document.entries[1].end_time_ms, 3500);

    let rebuilt = subwork::build(&document, subwork::OutputFormat::Srt);
    assert_eq!(
        rebuilt,
        "1\n00:00:01,500 --> 00:00:02,500\nHello\n\n2\n00:00:03,000 --> 00:00:03,500\nWorld\n\n"
    );
}

/// Find/replace counts changed entries and ignores case
#[test]
fn test_replaceAll_shouldCountChangedEntries() {
    let mut d = doc(&[(0, 1000), (2000, 3000), (4000, 5000)]);
    d.entries[0].text = "The Cat".to_string();
    d.entries[1].text = "the cat and the CAT".to_string();
    d.entries[2].text = "no match".to_string();

    assert_eq!(editor::replace_all(&mut d, "cat", "dog"), 2);
    assert_eq!(d.entries[0].text, "The dog");
    assert_eq!(d.entries[1].text, "the dog and the dog");
    assert_eq!(d.entries[2].text, "no match");

    assert_eq!(editor::replace_all(&mut d, "", "x"), 0);
}
