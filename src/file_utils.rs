use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::ParseError;
use crate::formats::SubtitleFormat;

// @module: File and directory utilities

// @const: SRT content sniffing regex
static SRT_CONTENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{2}:\d{2}:\d{2},\d{3}\s*-->\s*\d{2}:\d{2}:\d{2},\d{3}")
        .expect("Invalid SRT sniffing regex")
});

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Find subtitle files under a directory, any depth
    pub fn find_subtitle_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if SubtitleFormat::from_name(&ext.to_string_lossy()).is_ok() {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        result.sort();
        Ok(result)
    }

    /// Detect the subtitle format of a file from its extension, falling
    /// back to sniffing the content when the extension is missing or
    /// unknown. Never substitutes a different format silently: an
    /// undetectable file is an error.
    pub fn detect_format(path: &Path, content: &str) -> Result<SubtitleFormat, ParseError> {
        if let Some(ext) = path.extension() {
            if let Ok(format) = SubtitleFormat::from_name(&ext.to_string_lossy()) {
                return Ok(format);
            }
        }

        let head = content.trim_start();
        if head.to_uppercase().starts_with("WEBVTT") {
            return Ok(SubtitleFormat::Vtt);
        }
        if content.lines().any(|line| line.trim_start().starts_with("Dialogue:")) {
            return Ok(SubtitleFormat::Ass);
        }
        if SRT_CONTENT.is_match(content) {
            return Ok(SubtitleFormat::Srt);
        }

        Err(ParseError::UnsupportedFormat(
            path.extension()
                .map(|e| e.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        ))
    }

    // @generates: Output path with a suffix appended to the stem
    // @params: input ("movie.srt"), suffix ("_fixed"), extension ("srt")
    pub fn suffixed_output_path(input: &Path, suffix: &str, extension: &str) -> PathBuf {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        let file_name = format!("{stem}{suffix}.{extension}");
        input.with_file_name(file_name)
    }

    // @generates: Output path with the extension swapped
    pub fn converted_output_path(
        input: &Path,
        output_dir: Option<&Path>,
        extension: &str,
    ) -> PathBuf {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        let file_name = format!("{stem}.{extension}");
        match output_dir {
            Some(dir) => dir.join(file_name),
            None => input.with_file_name(file_name),
        }
    }
}
