/*!
 * Tests for file and format-detection utilities
 */

use subwork::file_utils::FileManager;
use subwork::SubtitleFormat;

use crate::common;

/// Directory scans find subtitle files of every supported extension
#[test]
fn test_findSubtitleFiles_shouldFindSupportedExtensionsOnly() {
    let temp = common::create_temp_dir().unwrap();
    let dir = temp.path();

    common::create_test_file(dir, "a.srt", common::SAMPLE_SRT).unwrap();
    common::create_test_file(dir, "b.vtt", common::SAMPLE_VTT).unwrap();
    common::create_test_file(dir, "c.ass", common::SAMPLE_ASS).unwrap();
    common::create_test_file(dir, "notes.txt", "not a subtitle").unwrap();
    std::fs::create_dir(dir.join("nested")).unwrap();
    common::create_test_file(&dir.join("nested"), "d.ssa", common::SAMPLE_ASS).unwrap();

    let files = FileManager::find_subtitle_files(dir).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(files.len(), 4);
    assert!(names.contains(&"a.srt".to_string()));
    assert!(names.contains(&"d.ssa".to_string()));
    assert!(!names.contains(&"notes.txt".to_string()));
}

/// Extension wins; content sniffing is the fallback
#[test]
fn test_detectFormat_extensionThenContent() {
    let temp = common::create_temp_dir().unwrap();
    let srt_path = common::create_test_file(temp.path(), "movie.srt", common::SAMPLE_SRT).unwrap();
    assert_eq!(
        FileManager::detect_format(&srt_path, common::SAMPLE_SRT).unwrap(),
        SubtitleFormat::Srt
    );

    // An extracted track with no meaningful extension is sniffed
    let raw_path = common::create_test_file(temp.path(), "track.dat", common::SAMPLE_VTT).unwrap();
    assert_eq!(
        FileManager::detect_format(&raw_path, common::SAMPLE_VTT).unwrap(),
        SubtitleFormat::Vtt
    );
}

/// Write/read round trip creates parent directories as needed
#[test]
fn test_writeToFile_shouldCreateParents() {
    let temp = common::create_temp_dir().unwrap();
    let nested = temp.path().join("a").join("b").join("out.srt");
    FileManager::write_to_file(&nested, common::SAMPLE_SRT).unwrap();
    assert_eq!(FileManager::read_to_string(&nested).unwrap(), common::SAMPLE_SRT);
}
