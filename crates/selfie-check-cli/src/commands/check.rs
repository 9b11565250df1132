//! Check command - validate images as selfies.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, ValueEnum};
use selfie_check_adapters::{DeadlineLandmarkProvider, FsImageSource, SidecarLandmarkProvider};
use selfie_check_core::{
    ImageSource, LandmarkProvider, PipelineSettings, ProgressEvent, ProgressSink, ResultOutput,
    ValidationPipeline, ValidationReport,
};
use tracing::{debug, info, warn};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar};

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// Parse a pixel-level threshold (0-255).
fn parse_level(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=255.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0..=255"))
    }
}

/// Parse and validate a ratio value (0.0-1.0).
fn parse_ratio(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=1.0"))
    }
}

/// Threshold overrides shared by `check` and `thresholds`.
#[derive(Args, Clone, Debug, Default)]
pub struct ThresholdArgs {
    /// Minimum mean channel difference (0-255)
    #[arg(long, value_name = "N", value_parser = parse_level)]
    pub color_threshold: Option<f64>,

    /// Minimum mean HSV saturation (0-255)
    #[arg(long, value_name = "N", value_parser = parse_level)]
    pub saturation_threshold: Option<f64>,

    /// Minimum face area / image area (0.0-1.0)
    #[arg(long, value_name = "RATIO", value_parser = parse_ratio)]
    pub min_face_ratio: Option<f64>,

    /// Maximum face center offset as a fraction of image size (0.0-1.0)
    #[arg(long, value_name = "RATIO", value_parser = parse_ratio)]
    pub max_center_offset: Option<f64>,
}

impl ThresholdArgs {
    /// Resolves settings: CLI flags over config values over defaults.
    pub fn resolve(&self, config: &AppConfig) -> PipelineSettings {
        let mut settings = config.pipeline_settings();
        if let Some(v) = self.color_threshold {
            settings.quality.color_threshold = v;
        }
        if let Some(v) = self.saturation_threshold {
            settings.quality.saturation_threshold = v;
        }
        if let Some(v) = self.min_face_ratio {
            settings.geometry.min_face_ratio = v;
        }
        if let Some(v) = self.max_center_offset {
            settings.geometry.max_center_offset = v;
        }
        settings
    }
}

/// Shared arguments for image validation.
#[derive(Args, Clone)]
pub struct CheckArgs {
    /// Image files or directories to validate
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Directory holding `<file name>.landmarks.json` sidecars
    /// (default: next to each image)
    #[arg(long, value_name = "DIR")]
    pub landmarks_dir: Option<PathBuf>,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config: Option<AppConfig>,
}

impl CheckArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        // Recursive: config applies only if CLI --recursive not passed
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        if args.landmarks_dir.is_none() {
            args.landmarks_dir.clone_from(&config.landmarks.dir);
        }

        // Output format: CLI > config (accessor provides fallback)
        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }

        // Boolean output options: CLI flag wins, then config
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args.config = Some(config.clone());

        args
    }

    /// Effective pipeline settings.
    fn settings(&self) -> PipelineSettings {
        self.config.as_ref().map_or_else(
            || self.thresholds.resolve(&AppConfig::default()),
            |config| self.thresholds.resolve(config),
        )
    }

    /// Detection deadline from config.
    fn timeout(&self) -> Option<Duration> {
        self.config.as_ref().and_then(AppConfig::landmark_timeout)
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Jsonl)
    }
}

/// Result of running the check command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct CheckResult {
    /// Number of images validated.
    pub processed: usize,
    /// Number of unreadable images skipped.
    pub skipped: usize,
    /// Number of rejected images.
    pub rejected: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the check command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &CheckArgs) -> Result<CheckResult> {
    info!("Running check command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let source = FsImageSource::new(args.paths.clone(), args.recursive);
    let total = source.count_hint();

    // Determine if we should show progress
    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    let output = JsonOutput::stdout();

    let provider = args
        .landmarks_dir
        .as_ref()
        .map_or_else(SidecarLandmarkProvider::new, SidecarLandmarkProvider::in_dir);
    let settings = args.settings();
    debug!("Effective settings: {settings:?}");

    match args.timeout() {
        Some(timeout) => {
            debug!("Landmark deadline: {timeout:?}");
            let pipeline = ValidationPipeline::with_settings(
                DeadlineLandmarkProvider::new(provider, timeout),
                settings,
            );
            process_images(&source, &pipeline, &output, &progress_bar, args)
        }
        None => {
            let pipeline = ValidationPipeline::with_settings(provider, settings);
            process_images(&source, &pipeline, &output, &progress_bar, args)
        }
    }
}

/// Validate every image from `source` and write one report each.
fn process_images<P: LandmarkProvider>(
    source: &FsImageSource,
    pipeline: &ValidationPipeline<P>,
    output: &JsonOutput,
    progress: &ProgressBar,
    args: &CheckArgs,
) -> Result<CheckResult> {
    let total = source.count_hint();
    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut rejected = 0usize;
    let mut all_reports: Vec<ValidationReport> = Vec::new();

    for (index, image_result) in source.images().enumerate() {
        let image = match image_result {
            Ok(img) => img,
            Err(e) => {
                warn!("Skipping unreadable image: {e:#}");
                // Note: error message contains the path via anyhow context
                progress.on_event(ProgressEvent::Skipped {
                    path: format!("image {index}"),
                    reason: format!("{e:#}"),
                });
                skipped += 1;
                continue;
            }
        };

        progress.on_event(ProgressEvent::Started {
            path: image.path.clone(),
            index,
            total,
        });

        let outcome = pipeline.validate(&image);
        let report = ValidationReport::new(&image, iso_timestamp(), outcome);

        if !outcome.is_valid() {
            info!("{}: {}", report.path, report.message);
            rejected += 1;
        }

        progress.on_event(ProgressEvent::Completed {
            report: report.clone(),
        });

        // Output based on format
        match args.format() {
            OutputFormat::Jsonl => {
                output.write(&report)?;
            }
            OutputFormat::Json => {
                all_reports.push(report);
            }
        }

        processed += 1;
    }

    // For JSON format, output all reports as array via adapter
    if matches!(args.format(), OutputFormat::Json) {
        output.write_array(&all_reports, args.pretty)?;
    }

    output.flush()?;

    progress.on_event(ProgressEvent::Finished { processed, skipped });

    let exit_code = if rejected > 0 {
        ExitCode::Rejected
    } else {
        ExitCode::Success
    };

    Ok(CheckResult {
        processed,
        skipped,
        rejected,
        exit_code,
    })
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
