/*!
 * End-to-end conversion tests through the controller
 */

use subwork::app_controller::Controller;
use subwork::{build, parse, Config, OutputFormat, ParseOptions, SubtitleFormat};

use crate::common;

fn controller() -> Controller {
    Controller::with_config(Config::default())
}

/// SRT round trip: parse then rebuild is semantically the same document,
/// modulo renumbering
#[test]
fn test_srtRoundTrip_shouldPreserveTimingAndText() {
    let doc = parse(common::SAMPLE_SRT, SubtitleFormat::Srt, &ParseOptions::strict()).unwrap();
    let rebuilt = build(&doc, OutputFormat::Srt);
    assert_eq!(rebuilt, common::SAMPLE_SRT);
}

/// SRT -> VTT -> SRT keeps timing exactly, swapping separators both ways
#[test]
fn test_srtToVttAndBack_shouldNormalizeSeparators() {
    let doc = parse(common::SAMPLE_SRT, SubtitleFormat::Srt, &ParseOptions::strict()).unwrap();
    let vtt_text = build(&doc, OutputFormat::Vtt);
    assert!(vtt_text.starts_with("WEBVTT"));
    assert!(vtt_text.contains("00:00:01.000 --> 00:00:04.000"));

    let vtt_doc = parse(&vtt_text, SubtitleFormat::Vtt, &ParseOptions::strict()).unwrap();
    let back = build(&vtt_doc, OutputFormat::Srt);
    assert_eq!(back, common::SAMPLE_SRT);
}

/// Converting a single file writes next to the input with the new extension
#[test]
fn test_convert_singleFile_shouldWriteConvertedOutput() {
    let temp = common::create_temp_dir().unwrap();
    let input = common::create_test_subtitle(temp.path(), "movie.srt").unwrap();

    let outcome = controller().convert(&input, OutputFormat::Vtt, None).unwrap();
    assert_eq!(outcome.converted, 1);
    assert_eq!(outcome.failed, 0);

    let output = temp.path().join("movie.vtt");
    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("WEBVTT"));
    assert!(written.contains("It contains multiple entries."));
}

/// ASS input converts to SRT with centiseconds widened and commas restored
#[test]
fn test_convert_assToSrt_shouldProduceSrtTimestamps() {
    let temp = common::create_temp_dir().unwrap();
    let input = common::create_test_file(temp.path(), "movie.ass", common::SAMPLE_ASS).unwrap();

    controller().convert(&input, OutputFormat::Srt, None).unwrap();
    let written = std::fs::read_to_string(temp.path().join("movie.srt")).unwrap();
    assert!(written.starts_with("1\n00:00:01,000 --> 00:00:04,000\n"));
    assert!(written.contains("{\\i1}Styled{\\i0} text, with a comma"));
}

/// Plain text export drops timing entirely
#[test]
fn test_convert_toText_shouldDropTiming() {
    let temp = common::create_temp_dir().unwrap();
    let input = common::create_test_subtitle(temp.path(), "movie.srt").unwrap();

    controller().convert(&input, OutputFormat::Text, None).unwrap();
    let written = std::fs::read_to_string(temp.path().join("movie.txt")).unwrap();
    assert_eq!(
        written,
        "This is a test subtitle.\nIt contains multiple entries.\nFor testing purposes."
    );
}

/// A directory batch converts every file independently; one broken file is
/// counted as failed without aborting the rest
#[test]
fn test_convert_directoryBatch_shouldIsolateFailures() {
    let temp = common::create_temp_dir().unwrap();
    let out = common::create_temp_dir().unwrap();
    common::create_test_file(temp.path(), "good1.srt", common::SAMPLE_SRT).unwrap();
    common::create_test_file(temp.path(), "good2.vtt", common::SAMPLE_VTT).unwrap();
    common::create_test_file(temp.path(), "broken.srt", common::BROKEN_SRT).unwrap();

    let outcome = controller()
        .convert(temp.path(), OutputFormat::Srt, Some(out.path()))
        .unwrap();
    assert_eq!(outcome.converted, 2);
    assert_eq!(outcome.failed, 1);

    assert!(out.path().join("good1.srt").exists());
    assert!(out.path().join("good2.srt").exists());
    assert!(!out.path().join("broken.srt").exists());
}

/// Strict conversion of a file with a bad block fails for that file and
/// surfaces the block ordinal
#[test]
fn test_convert_brokenFile_shouldFailWithBlockOrdinal() {
    let temp = common::create_temp_dir().unwrap();
    let input = common::create_test_file(temp.path(), "broken.srt", common::BROKEN_SRT).unwrap();

    let err = controller()
        .convert(&input, OutputFormat::Vtt, None)
        .unwrap_err();
    assert!(err.to_string().contains("block 2"), "got: {err}");
}
