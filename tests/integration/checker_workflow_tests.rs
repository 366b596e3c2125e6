/*!
 * Health check, repair and strip workflow tests through the controller
 */

use subwork::app_controller::Controller;
use subwork::Config;

use crate::common;

fn controller() -> Controller {
    Controller::with_config(Config::default())
}

/// An SRT with constructed issues: overlap, short duration, long line,
/// and one malformed block
const UNHEALTHY_SRT: &str = "1\n00:00:01,000 --> 00:00:03,500\nOverlaps the next entry\n\n2\n00:00:03,000 --> 00:00:03,400\nShort\n\nnot a real block\n\n4\n00:00:10,000 --> 00:00:12,000\nThis single line is far too long to fit on one subtitle line\n\n";

/// Check reports the issues without mutating the file
#[test]
fn test_check_shouldCountIssuesAndLeaveFileUntouched() {
    let temp = common::create_temp_dir().unwrap();
    let input = common::create_test_file(temp.path(), "bad.srt", UNHEALTHY_SRT).unwrap();

    let summary = controller().check(&input, None).unwrap();
    assert_eq!(summary.total_entries, 4);
    assert_eq!(summary.syntax, 1);
    assert_eq!(summary.overlap, 1);
    assert_eq!(summary.short_duration, 1);
    assert_eq!(summary.line_too_long, 1);

    // The source file is not modified by a check
    assert_eq!(std::fs::read_to_string(&input).unwrap(), UNHEALTHY_SRT);
}

/// The report file names the file, carries a summary and lists flagged
/// entries including the malformed raw block
#[test]
fn test_check_withReport_shouldWriteReadableReport() {
    let temp = common::create_temp_dir().unwrap();
    let input = common::create_test_file(temp.path(), "bad.srt", UNHEALTHY_SRT).unwrap();
    let report_path = temp.path().join("report.txt");

    controller().check(&input, Some(&report_path)).unwrap();
    let report = std::fs::read_to_string(&report_path).unwrap();
    assert!(report.contains("bad.srt"));
    assert!(report.contains("Generated:"));
    assert!(report.contains("overlap"));
    assert!(report.contains("not a real block"));
}

/// Fix repairs timing issues and the rewritten file re-checks clean of them
#[test]
fn test_fix_thenCheck_shouldClearTimingIssues() {
    let temp = common::create_temp_dir().unwrap();
    let input = common::create_test_file(temp.path(), "bad.srt", UNHEALTHY_SRT).unwrap();

    let (repairs, summary) = controller().fix(&input, None).unwrap();
    assert!(repairs >= 2);
    assert_eq!(summary.overlap, 0);
    assert_eq!(summary.short_duration, 0);
    // Text issues are untouched by design
    assert_eq!(summary.line_too_long, 1);

    let fixed_path = temp.path().join("bad_fixed.srt");
    let re_checked = controller().check(&fixed_path, None).unwrap();
    assert_eq!(re_checked.overlap, 0);
    assert_eq!(re_checked.short_duration, 0);
    // The malformed block is dropped when the repaired document is rebuilt
    assert_eq!(re_checked.syntax, 0);
}

/// Shift writes a shifted copy and reports the entry count
#[test]
fn test_shift_file_shouldWriteShiftedCopy() {
    let temp = common::create_temp_dir().unwrap();
    let input = common::create_test_subtitle(temp.path(), "movie.srt").unwrap();

    let shifted = controller().shift(&input, 2_000, None).unwrap();
    assert_eq!(shifted, 3);

    let written = std::fs::read_to_string(temp.path().join("movie_shifted.srt")).unwrap();
    assert!(written.starts_with("1\n00:00:03,000 --> 00:00:06,000\n"));
}

/// A zero shift is rejected end to end
#[test]
fn test_shift_file_withZeroDelta_shouldFail() {
    let temp = common::create_temp_dir().unwrap();
    let input = common::create_test_subtitle(temp.path(), "movie.srt").unwrap();
    assert!(controller().shift(&input, 0, None).is_err());
    assert!(!temp.path().join("movie_shifted.srt").exists());
}

/// Stripping hearing-impaired annotations and style tags cleans the text
#[test]
fn test_strip_shouldRemoveHiAndStyleTags() {
    let content = "1\n00:00:01,000 --> 00:00:03,000\n[DOOR SLAMS]\n<i>Who's there?</i>\n\n2\n00:00:04,000 --> 00:00:06,000\n(whispering) It's me.\n\n";
    let temp = common::create_temp_dir().unwrap();
    let input = common::create_test_file(temp.path(), "hi.srt", content).unwrap();

    let changed = controller().strip(&input, true, true, None).unwrap();
    assert_eq!(changed, 2);

    let written = std::fs::read_to_string(temp.path().join("hi_stripped.srt")).unwrap();
    assert!(written.contains("Who's there?"));
    assert!(written.contains("It's me."));
    assert!(!written.contains("DOOR SLAMS"));
    assert!(!written.contains("whispering"));
    assert!(!written.contains("<i>"));
}

/// Strip with no category selected is a usage error
#[test]
fn test_strip_withNothingSelected_shouldFail() {
    let temp = common::create_temp_dir().unwrap();
    let input = common::create_test_subtitle(temp.path(), "movie.srt").unwrap();
    assert!(controller().strip(&input, false, false, None).is_err());
}
