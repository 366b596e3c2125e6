use anyhow::{anyhow, Result};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::editor;
use crate::extract;
use crate::file_utils::FileManager;
use crate::formats::{self, timecode, OutputFormat, ParseOptions, SubtitleFormat};
use crate::session::EditSession;
use crate::styling;
use crate::validation::{ValidationService, ValidationSummary};

// @module: Application controller for the subtitle tools

/// Result of a batch conversion
#[derive(Debug, Default)]
pub struct ConvertOutcome {
    /// Files converted successfully
    pub converted: usize,
    /// Files that failed; each failure has already been logged
    pub failed: usize,
}

/// Main application controller. Owns the configuration and composes one
/// edit session per processed document; sessions are dropped when their
/// operation completes.
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    fn strict_options(&self) -> ParseOptions {
        ParseOptions::strict().with_override_stripping(self.config.strip_ass_overrides)
    }

    fn tolerant_options(&self) -> ParseOptions {
        ParseOptions::tolerant().with_override_stripping(self.config.strip_ass_overrides)
    }

    /// Convert a file, or every subtitle file under a directory, to the
    /// requested output format. Each file is independent: one failing file
    /// is reported and counted without aborting the batch.
    pub fn convert(
        &self,
        input: &Path,
        output: OutputFormat,
        output_dir: Option<&Path>,
    ) -> Result<ConvertOutcome> {
        if input.is_dir() {
            let files = FileManager::find_subtitle_files(input)?;
            if files.is_empty() {
                return Err(anyhow!("No subtitle files found under {:?}", input));
            }

            let progress = ProgressBar::new(files.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );

            let mut outcome = ConvertOutcome::default();
            for file in &files {
                progress.set_message(
                    file.file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default(),
                );
                match self.convert_file(file, output, output_dir) {
                    Ok(path) => {
                        info!("Converted {:?} -> {:?}", file, path);
                        outcome.converted += 1;
                    }
                    Err(e) => {
                        warn!("Skipping {:?}: {}", file, e);
                        outcome.failed += 1;
                    }
                }
                progress.inc(1);
            }
            progress.finish_and_clear();
            Ok(outcome)
        } else {
            let path = self.convert_file(input, output, output_dir)?;
            info!("Converted {:?} -> {:?}", input, path);
            Ok(ConvertOutcome {
                converted: 1,
                failed: 0,
            })
        }
    }

    /// Strict-parse one file and write it in the output format
    fn convert_file(
        &self,
        input: &Path,
        output: OutputFormat,
        output_dir: Option<&Path>,
    ) -> Result<PathBuf> {
        let content = FileManager::read_to_string(input)?;
        let format = FileManager::detect_format(input, &content)?;
        let doc = formats::parse(&content, format, &self.strict_options())?;

        let built = formats::build(&doc, output);
        let output_path = FileManager::converted_output_path(input, output_dir, output.extension());
        FileManager::write_to_file(&output_path, &built)?;
        Ok(output_path)
    }

    /// Tolerant-parse a file and analyze it, optionally writing a report
    pub fn check(&self, input: &Path, report: Option<&Path>) -> Result<ValidationSummary> {
        let mut session = EditSession::open(input, &self.tolerant_options())?;
        let service = ValidationService::with_config(self.config.validation.clone());
        let summary = service.analyze(&mut session.document);

        info!("{}: {}", input.display(), summary);

        if let Some(report_path) = report {
            let report_text = render_report(input, &session, &summary);
            FileManager::write_to_file(report_path, &report_text)?;
            info!("Report written to {:?}", report_path);
        }
        Ok(summary)
    }

    /// Repair common timing issues and write the result as SRT.
    /// Returns the repair count and the post-repair summary.
    pub fn fix(&self, input: &Path, output: Option<&Path>) -> Result<(usize, ValidationSummary)> {
        let mut session = EditSession::open(input, &self.tolerant_options())?;
        let service = ValidationService::with_config(self.config.validation.clone());

        let repairs = service.fix_common_issues(&mut session.document);
        let summary = service.analyze(&mut session.document);

        let output_path = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| FileManager::suffixed_output_path(input, "_fixed", "srt"));
        FileManager::write_to_file(&output_path, &formats::build_srt(&session.document))?;
        info!(
            "Applied {} repair(s), wrote {:?}; remaining: {}",
            repairs, output_path, summary
        );
        Ok((repairs, summary))
    }

    /// Shift every entry of a file by a signed delta and write as SRT
    pub fn shift(&self, input: &Path, delta_ms: i64, output: Option<&Path>) -> Result<usize> {
        let mut session = EditSession::open(input, &self.tolerant_options())?;
        let shifted = editor::shift(&mut session.document, delta_ms)?;

        let output_path = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| FileManager::suffixed_output_path(input, "_shifted", "srt"));
        FileManager::write_to_file(&output_path, &formats::build_srt(&session.document))?;
        info!(
            "Shifted {} entries by {} ms, wrote {:?}",
            shifted, delta_ms, output_path
        );
        Ok(shifted)
    }

    /// Remove hearing-impaired annotations and/or style tags and write as
    /// SRT. Returns the number of entries whose text changed.
    pub fn strip(
        &self,
        input: &Path,
        hearing_impaired: bool,
        style_tags: bool,
        output: Option<&Path>,
    ) -> Result<usize> {
        if !hearing_impaired && !style_tags {
            return Err(anyhow!("Nothing to strip: pass --hi and/or --styles"));
        }

        let mut session = EditSession::open(input, &self.tolerant_options())?;
        let mut changed = 0;
        if hearing_impaired {
            changed += styling::strip_hearing_impaired_from(&mut session.document);
        }
        if style_tags {
            changed += styling::strip_style_tags_from(&mut session.document);
        }

        let output_path = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| FileManager::suffixed_output_path(input, "_stripped", "srt"));
        FileManager::write_to_file(&output_path, &formats::build_srt(&session.document))?;
        info!("Cleaned {} entries, wrote {:?}", changed, output_path);
        Ok(changed)
    }

    /// List the subtitle tracks of a container
    pub async fn list_tracks(&self, video: &Path) -> Result<Vec<extract::TrackInfo>> {
        let tracks = extract::list_tracks(video).await?;
        if tracks.is_empty() {
            info!("No subtitle tracks found in {:?}", video);
        }
        for track in &tracks {
            info!(
                "Track {}: {} ({}){}",
                track.index,
                track.codec_name,
                track.language.as_deref().unwrap_or("und"),
                track
                    .title
                    .as_deref()
                    .map(|t| format!(" - {t}"))
                    .unwrap_or_default()
            );
        }
        Ok(tracks)
    }

    /// Extract one track from a container, optionally converting it, and
    /// write it next to the video
    pub async fn extract_track(
        &self,
        video: &Path,
        track_index: usize,
        convert_to: Option<OutputFormat>,
        output: Option<&Path>,
    ) -> Result<PathBuf> {
        let extracted = extract::extract_track(video, track_index).await?;

        let (content, extension) = match convert_to {
            Some(output_format) => {
                let format = match extracted.format.as_subtitle_format() {
                    Some(format) => format,
                    // Unknown declared format: fall back to sniffing
                    None => FileManager::detect_format(Path::new("extracted"), &extracted.content)?,
                };
                let doc = formats::parse(&extracted.content, format, &self.strict_options())?;
                (formats::build(&doc, output_format), output_format.extension())
            }
            None => (extracted.content, extracted.format.extension()),
        };

        let output_path = output.map(Path::to_path_buf).unwrap_or_else(|| {
            FileManager::suffixed_output_path(video, &format!("_track{track_index}"), extension)
        });
        FileManager::write_to_file(&output_path, &content)?;
        info!("Extracted track {} to {:?}", track_index, output_path);
        Ok(output_path)
    }
}

/// Render a plain-text health report for entries that carry issues
fn render_report(input: &Path, session: &EditSession, summary: &ValidationSummary) -> String {
    let mut report = String::new();
    report.push_str(&format!("Subtitle health report: {}\n", input.display()));
    report.push_str(&format!(
        "Generated: {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    report.push_str(&format!("Summary: {summary}\n\n"));

    for entry in &session.document.entries {
        if !entry.has_issues() {
            continue;
        }
        if entry.malformed {
            report.push_str(&format!("#{} <malformed block>\n", entry.index));
            for line in entry.raw.lines() {
                report.push_str(&format!("    | {line}\n"));
            }
        } else {
            report.push_str(&format!(
                "#{} {} --> {}\n",
                entry.index,
                timecode::format_timestamp(entry.start_time_ms, SubtitleFormat::Srt),
                timecode::format_timestamp(entry.end_time_ms, SubtitleFormat::Srt),
            ));
        }
        for issue in entry.all_issues() {
            report.push_str(&format!("  - {}: {}\n", issue.kind, issue.message));
        }
    }
    report
}
