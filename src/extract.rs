/*!
 * External transcoding collaborator.
 *
 * Container demuxing is delegated entirely to ffmpeg/ffprobe, invoked as
 * black boxes: ffprobe lists the subtitle streams of a container, ffmpeg
 * copies one stream out as raw subtitle text. The returned text carries a
 * declared format tag and flows into the same parsers as any other input.
 * Bitmap subtitle tracks (PGS/VobSub/DVB) cannot become text and are
 * rejected up front.
 */

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::{debug, error, warn};
use serde_json::{from_str, Value};
use tokio::process::Command;

use crate::formats::SubtitleFormat;

/// Format tag declared by the container for an extracted track.
/// Advisory only; the parsers remain the source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredFormat {
    Srt,
    Vtt,
    Ass,
    Unknown,
}

impl DeclaredFormat {
    /// Map a container codec name to a format tag
    pub fn from_codec_name(codec_name: &str) -> Self {
        match codec_name.to_lowercase().as_str() {
            "subrip" | "srt" => DeclaredFormat::Srt,
            "webvtt" | "vtt" => DeclaredFormat::Vtt,
            "ass" | "ssa" => DeclaredFormat::Ass,
            _ => DeclaredFormat::Unknown,
        }
    }

    /// The parser format for this tag, when one is declared
    pub fn as_subtitle_format(&self) -> Option<SubtitleFormat> {
        match self {
            DeclaredFormat::Srt => Some(SubtitleFormat::Srt),
            DeclaredFormat::Vtt => Some(SubtitleFormat::Vtt),
            DeclaredFormat::Ass => Some(SubtitleFormat::Ass),
            DeclaredFormat::Unknown => None,
        }
    }

    /// File extension used when writing the raw track to disk
    pub fn extension(&self) -> &'static str {
        match self {
            DeclaredFormat::Srt => "srt",
            DeclaredFormat::Vtt => "vtt",
            DeclaredFormat::Ass => "ass",
            DeclaredFormat::Unknown => "sub",
        }
    }
}

/// One subtitle stream in a container
#[derive(Debug, Clone)]
pub struct TrackInfo {
    /// Stream index within the container
    pub index: usize,
    /// Codec name as reported by ffprobe
    pub codec_name: String,
    /// Declared language tag, if any
    pub language: Option<String>,
    /// Stream title, if any
    pub title: Option<String>,
}

impl TrackInfo {
    /// Declared text format of this track
    pub fn declared_format(&self) -> DeclaredFormat {
        DeclaredFormat::from_codec_name(&self.codec_name)
    }

    /// Bitmap tracks carry images, not text, and need OCR to convert
    pub fn is_bitmap(&self) -> bool {
        matches!(
            self.codec_name.as_str(),
            "hdmv_pgs_subtitle" | "dvd_subtitle" | "dvb_subtitle" | "xsub"
        )
    }
}

/// Raw text of one extracted track plus its declared format
#[derive(Debug)]
pub struct ExtractedTrack {
    pub content: String,
    pub format: DeclaredFormat,
}

/// List the subtitle streams of a container via ffprobe
pub async fn list_tracks<P: AsRef<Path>>(video_path: P) -> Result<Vec<TrackInfo>> {
    let video_path = video_path.as_ref();
    if !video_path.exists() {
        return Err(anyhow!("Video file not found: {:?}", video_path));
    }

    let ffprobe_future = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_streams",
            "-select_streams",
            "s",
            video_path.to_str().unwrap_or(""),
        ])
        .output();

    let timeout = std::time::Duration::from_secs(60);
    let output = tokio::select! {
        result = ffprobe_future => {
            result.map_err(|e| anyhow!("Failed to execute ffprobe: {}", e))?
        },
        _ = tokio::time::sleep(timeout) => {
            return Err(anyhow!("ffprobe timed out after 60 seconds"));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!("ffprobe failed: {}", stderr);
        return Err(anyhow!("ffprobe command failed: {}", stderr));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if stdout.trim().is_empty() {
        return Ok(Vec::new());
    }

    parse_ffprobe_streams(&stdout)
}

/// Parse ffprobe's JSON stream listing. Split out from the process
/// invocation so the mapping is testable against fixtures.
pub fn parse_ffprobe_streams(json_text: &str) -> Result<Vec<TrackInfo>> {
    let json: Value = from_str(json_text).context("Failed to parse ffprobe JSON output")?;

    let mut tracks = Vec::new();
    if let Some(streams) = json.get("streams").and_then(|s| s.as_array()) {
        for stream in streams {
            let index = stream
                .get("index")
                .and_then(|v| v.as_u64())
                .map(|v| v as usize)
                .unwrap_or(0);

            let codec_name = stream
                .get("codec_name")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown");

            let language = stream
                .get("tags")
                .and_then(|t| t.get("language"))
                .and_then(|l| l.as_str())
                .map(|s| s.to_string());

            let title = stream
                .get("tags")
                .and_then(|t| t.get("title"))
                .and_then(|l| l.as_str())
                .map(|s| s.to_string());

            tracks.push(TrackInfo {
                index,
                codec_name: codec_name.to_string(),
                language,
                title,
            });
        }
    }
    Ok(tracks)
}

/// Extract one subtitle track's raw text from a container.
///
/// The stream is copied out without transcoding so the parsers see the
/// original track text.
pub async fn extract_track<P: AsRef<Path>>(video_path: P, track_index: usize) -> Result<ExtractedTrack> {
    let video_path = video_path.as_ref();

    let tracks = list_tracks(video_path).await?;
    let track = tracks
        .iter()
        .find(|t| t.index == track_index)
        .ok_or_else(|| anyhow!("No subtitle track with index {} in {:?}", track_index, video_path))?;

    if track.is_bitmap() {
        return Err(anyhow!(
            "Track {} is a bitmap subtitle ({}) and cannot be extracted as text; it would need OCR",
            track_index,
            track.codec_name
        ));
    }

    let format = track.declared_format();
    if format == DeclaredFormat::Unknown {
        warn!(
            "Track {} has unrecognized codec '{}'; extracting anyway",
            track_index, track.codec_name
        );
    }

    let scratch = tempfile::tempdir().context("Failed to create scratch directory")?;
    let output_path = scratch.path().join(format!("track.{}", format.extension()));

    debug!("Extracting track {} from {:?}", track_index, video_path);
    let ffmpeg_future = Command::new("ffmpeg")
        .args([
            "-y",
            "-i",
            video_path.to_str().unwrap_or_default(),
            "-map",
            &format!("0:{}", track_index),
            "-c",
            "copy",
            output_path.to_str().unwrap_or_default(),
        ])
        .output();

    let timeout = std::time::Duration::from_secs(120);
    let result = tokio::select! {
        result = ffmpeg_future => {
            result.map_err(|e| anyhow!("Failed to execute ffmpeg: {}", e))?
        },
        _ = tokio::time::sleep(timeout) => {
            return Err(anyhow!("ffmpeg timed out after 2 minutes"));
        }
    };

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        let filtered = filter_ffmpeg_stderr(&stderr);
        error!("Track extraction failed: {}", filtered);
        return Err(anyhow!("ffmpeg extraction failed: {}", filtered));
    }

    let content = std::fs::read_to_string(&output_path)
        .with_context(|| format!("Failed to read extracted track: {:?}", output_path))?;
    if content.trim().is_empty() {
        return Err(anyhow!("Extracted track {} is empty", track_index));
    }

    Ok(ExtractedTrack { content, format })
}

/// Keep only the meaningful ffmpeg stderr lines, stripping the version
/// banner, build configuration and stream metadata noise.
fn filter_ffmpeg_stderr(stderr: &str) -> String {
    let noise_prefixes = [
        "ffmpeg version",
        "  built with",
        "  configuration:",
        "  lib",
        "Input #",
        "  Metadata:",
        "  Duration:",
        "  Stream #",
        "      Metadata:",
        "Output #",
        "Stream mapping:",
        "Press [q]",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            !noise_prefixes.iter().any(|p| line.starts_with(p))
        })
        .collect();

    if meaningful.is_empty() {
        "unknown ffmpeg error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
