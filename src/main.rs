// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use crate::app_config::Config;
use crate::app_controller::Controller;
use crate::formats::OutputFormat;

mod app_config;
mod app_controller;
mod editor;
mod errors;
mod extract;
mod file_utils;
mod formats;
mod session;
mod styling;
mod subtitle_document;
mod validation;

/// CLI wrapper for OutputFormat to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Srt,
    Vtt,
    Txt,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(cli_format: CliOutputFormat) -> Self {
        match cli_format {
            CliOutputFormat::Srt => OutputFormat::Srt,
            CliOutputFormat::Vtt => OutputFormat::Vtt,
            CliOutputFormat::Txt => OutputFormat::Text,
        }
    }
}

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert subtitle files between formats (strict parsing)
    Convert {
        /// Subtitle file or directory to convert
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum)]
        to: CliOutputFormat,

        /// Directory for converted files (defaults to next to the input)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Check a subtitle file for timing and presentation issues
    Check {
        /// Subtitle file to check
        input: PathBuf,

        /// Write a plain-text report to this path
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Repair overlaps and too-short durations, then re-check
    Fix {
        /// Subtitle file to repair
        input: PathBuf,

        /// Output path (defaults to <input>_fixed.srt)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Shift all entries by a signed millisecond delta
    Shift {
        /// Subtitle file to shift
        input: PathBuf,

        /// Delta in milliseconds, negative shifts backwards
        #[arg(long, value_name = "MS", allow_hyphen_values = true)]
        by_ms: i64,

        /// Output path (defaults to <input>_shifted.srt)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Remove hearing-impaired annotations and/or style tags
    Strip {
        /// Subtitle file to clean
        input: PathBuf,

        /// Remove [bracketed] and (parenthesised) annotations
        #[arg(long)]
        hi: bool,

        /// Remove <i>-style inline tags
        #[arg(long)]
        styles: bool,

        /// Output path (defaults to <input>_stripped.srt)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the subtitle tracks of a video container
    Tracks {
        /// Video file to inspect
        video: PathBuf,
    },

    /// Extract one subtitle track from a video container
    Extract {
        /// Video file to extract from
        video: PathBuf,

        /// Stream index of the track (see `tracks`)
        #[arg(short, long)]
        track: usize,

        /// Convert the extracted track to this format
        #[arg(long, value_enum)]
        to: Option<CliOutputFormat>,

        /// Output path (defaults to <video>_track<N>.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions for subwork
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subwork - subtitle timing toolkit
#[derive(Parser, Debug)]
#[command(name = "subwork")]
#[command(version = "1.0.0")]
#[command(about = "Convert, check, repair and shift SRT/WebVTT/ASS subtitle files")]
#[command(long_about = "subwork parses subtitle files with millisecond precision, flags timing \
and presentation issues, repairs the common ones, converts between formats and extracts \
subtitle tracks from video containers via ffmpeg.

EXAMPLES:
    subwork convert movie.ass --to srt          # Convert one file
    subwork convert /subs --to vtt -o /out      # Convert a whole directory
    subwork check movie.srt --report report.txt # Health check with report
    subwork fix movie.srt                       # Repair overlaps/short durations
    subwork shift movie.srt --by-ms -2000       # Pull subtitles 2s earlier
    subwork strip movie.srt --hi --styles       # Clean HI tags and styling
    subwork tracks movie.mkv                    # List embedded tracks
    subwork extract movie.mkv --track 2 --to srt
    subwork completions bash > subwork.bash")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "subwork.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default; the level is
    // raised or lowered after the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "subwork", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = if std::path::Path::new(&cli.config_path).exists() {
        Config::from_file(&cli.config_path)?
    } else {
        Config::default()
    };
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config);

    match cli.command {
        Commands::Convert {
            input,
            to,
            output_dir,
        } => {
            let outcome = controller.convert(&input, to.into(), output_dir.as_deref())?;
            if outcome.failed > 0 {
                log::warn!(
                    "{} file(s) converted, {} failed",
                    outcome.converted,
                    outcome.failed
                );
            }
        }
        Commands::Check { input, report } => {
            let summary = controller.check(&input, report.as_deref())?;
            println!("{}", summary);
        }
        Commands::Fix { input, output } => {
            let (repairs, summary) = controller.fix(&input, output.as_deref())?;
            println!("{} repair(s) applied; remaining: {}", repairs, summary);
        }
        Commands::Shift {
            input,
            by_ms,
            output,
        } => {
            let shifted = controller.shift(&input, by_ms, output.as_deref())?;
            println!("Shifted {} entries by {} ms", shifted, by_ms);
        }
        Commands::Strip {
            input,
            hi,
            styles,
            output,
        } => {
            let changed = controller.strip(&input, hi, styles, output.as_deref())?;
            println!("Cleaned {} entries", changed);
        }
        Commands::Tracks { video } => {
            let tracks = controller.list_tracks(&video).await?;
            for track in tracks {
                println!(
                    "{}\t{}\t{}\t{}",
                    track.index,
                    track.codec_name,
                    track.language.as_deref().unwrap_or("und"),
                    track.title.as_deref().unwrap_or("-")
                );
            }
        }
        Commands::Extract {
            video,
            track,
            to,
            output,
        } => {
            let path = controller
                .extract_track(&video, track, to.map(Into::into), output.as_deref())
                .await?;
            println!("{}", path.display());
        }
        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
