//! Configuration file support for selfie-check.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/selfie-check/config.toml` (lowest priority)
//! - Project-local: `.selfie-check.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};
use std::time::Duration;

use selfie_check_core::{GeometryThresholds, LandmarkLayout, PipelineSettings, QualityThresholds};
use serde::Deserialize;
use tracing::{debug, info};

/// Project-local config file name.
const PROJECT_CONFIG: &str = ".selfie-check.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Image quality check settings.
    pub quality: QualityConfig,
    /// Face geometry check settings.
    pub geometry: GeometryConfig,
    /// Landmark source settings.
    pub landmarks: LandmarksConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Quality check configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Minimum mean channel difference (0-255).
    pub color_threshold: Option<f64>,
    /// Minimum mean HSV saturation (0-255).
    pub saturation_threshold: Option<f64>,
    /// Luminance mean above which a flat image counts as negative (0-255).
    pub negative_mean: Option<f64>,
    /// Luminance std below which a bright image counts as negative.
    pub negative_std_dev: Option<f64>,
}

/// Geometry check configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Minimum face area / image area (0.0-1.0).
    pub min_face_ratio: Option<f64>,
    /// Maximum center offset as a fraction of image size (0.0-1.0).
    pub max_center_offset: Option<f64>,
    /// Minimum face height / width.
    pub min_aspect_ratio: Option<f64>,
    /// Maximum face height / width.
    pub max_aspect_ratio: Option<f64>,
    /// Maximum eye height difference as a fraction of face height (0.0-1.0).
    pub max_eye_tilt: Option<f64>,
    /// Maximum nose offset as a fraction of face width (0.0-1.0).
    pub max_nose_offset: Option<f64>,
}

/// Landmark source configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct LandmarksConfig {
    /// Directory holding `<file name>.landmarks.json` sidecars.
    pub dir: Option<PathBuf>,
    /// Per-image detection deadline in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Left eye outer corner index.
    pub left_eye: Option<usize>,
    /// Right eye outer corner index.
    pub right_eye: Option<usize>,
    /// Nose tip index.
    pub nose_tip: Option<usize>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/selfie-check/config.toml`
    /// 2. Project-local: `.selfie-check.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Unparseable files are skipped with a
    /// warning. Out-of-range values in the merged result are an error.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = Self::default();

        // Load XDG config (lowest priority)
        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        // Load project-local config (higher priority, merged)
        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        config
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

        Ok(config)
    }

    /// Builds pipeline settings from config values over the built-in defaults.
    pub fn pipeline_settings(&self) -> PipelineSettings {
        let q = QualityThresholds::default();
        let g = GeometryThresholds::default();
        let l = LandmarkLayout::default();

        PipelineSettings {
            quality: QualityThresholds {
                color_threshold: self.quality.color_threshold.unwrap_or(q.color_threshold),
                saturation_threshold: self
                    .quality
                    .saturation_threshold
                    .unwrap_or(q.saturation_threshold),
                negative_mean: self.quality.negative_mean.unwrap_or(q.negative_mean),
                negative_std_dev: self.quality.negative_std_dev.unwrap_or(q.negative_std_dev),
            },
            geometry: GeometryThresholds {
                min_face_ratio: self.geometry.min_face_ratio.unwrap_or(g.min_face_ratio),
                max_center_offset: self
                    .geometry
                    .max_center_offset
                    .unwrap_or(g.max_center_offset),
                min_aspect_ratio: self.geometry.min_aspect_ratio.unwrap_or(g.min_aspect_ratio),
                max_aspect_ratio: self.geometry.max_aspect_ratio.unwrap_or(g.max_aspect_ratio),
                max_eye_tilt: self.geometry.max_eye_tilt.unwrap_or(g.max_eye_tilt),
                max_nose_offset: self.geometry.max_nose_offset.unwrap_or(g.max_nose_offset),
            },
            layout: LandmarkLayout {
                left_eye: self.landmarks.left_eye.unwrap_or(l.left_eye),
                right_eye: self.landmarks.right_eye.unwrap_or(l.right_eye),
                nose_tip: self.landmarks.nose_tip.unwrap_or(l.nose_tip),
            },
        }
    }

    /// Detection deadline, if configured.
    pub fn landmark_timeout(&self) -> Option<Duration> {
        self.landmarks.timeout_ms.map(Duration::from_millis)
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        let pixel_levels = [
            ("quality.color_threshold", self.quality.color_threshold),
            ("quality.saturation_threshold", self.quality.saturation_threshold),
            ("quality.negative_mean", self.quality.negative_mean),
            ("quality.negative_std_dev", self.quality.negative_std_dev),
        ];
        for (name, value) in pixel_levels {
            if let Some(v) = value {
                if !(0.0..=255.0).contains(&v) {
                    return Err(format!("{name} must be 0-255, got {v}"));
                }
            }
        }

        let fractions = [
            ("geometry.min_face_ratio", self.geometry.min_face_ratio),
            ("geometry.max_center_offset", self.geometry.max_center_offset),
            ("geometry.max_eye_tilt", self.geometry.max_eye_tilt),
            ("geometry.max_nose_offset", self.geometry.max_nose_offset),
        ];
        for (name, value) in fractions {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    return Err(format!("{name} must be 0.0-1.0, got {v}"));
                }
            }
        }

        for (name, value) in [
            ("geometry.min_aspect_ratio", self.geometry.min_aspect_ratio),
            ("geometry.max_aspect_ratio", self.geometry.max_aspect_ratio),
        ] {
            if let Some(v) = value {
                if v <= 0.0 {
                    return Err(format!("{name} must be positive, got {v}"));
                }
            }
        }
        // Either bound may be left at its default
        let defaults = GeometryThresholds::default();
        let min = self.geometry.min_aspect_ratio.unwrap_or(defaults.min_aspect_ratio);
        let max = self.geometry.max_aspect_ratio.unwrap_or(defaults.max_aspect_ratio);
        if min > max {
            return Err(format!(
                "geometry.min_aspect_ratio ({min}) exceeds geometry.max_aspect_ratio ({max})"
            ));
        }

        if self.landmarks.timeout_ms == Some(0) {
            return Err("landmarks.timeout_ms must be greater than 0".to_string());
        }

        // Output format validation
        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // General
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        // Quality
        self.quality.color_threshold = other.quality.color_threshold.or(self.quality.color_threshold);
        self.quality.saturation_threshold = other
            .quality
            .saturation_threshold
            .or(self.quality.saturation_threshold);
        self.quality.negative_mean = other.quality.negative_mean.or(self.quality.negative_mean);
        self.quality.negative_std_dev = other
            .quality
            .negative_std_dev
            .or(self.quality.negative_std_dev);

        // Geometry
        self.geometry.min_face_ratio = other.geometry.min_face_ratio.or(self.geometry.min_face_ratio);
        self.geometry.max_center_offset = other
            .geometry
            .max_center_offset
            .or(self.geometry.max_center_offset);
        self.geometry.min_aspect_ratio = other
            .geometry
            .min_aspect_ratio
            .or(self.geometry.min_aspect_ratio);
        self.geometry.max_aspect_ratio = other
            .geometry
            .max_aspect_ratio
            .or(self.geometry.max_aspect_ratio);
        self.geometry.max_eye_tilt = other.geometry.max_eye_tilt.or(self.geometry.max_eye_tilt);
        self.geometry.max_nose_offset = other
            .geometry
            .max_nose_offset
            .or(self.geometry.max_nose_offset);

        // Landmarks
        self.landmarks.dir = other.landmarks.dir.or_else(|| self.landmarks.dir.take());
        self.landmarks.timeout_ms = other.landmarks.timeout_ms.or(self.landmarks.timeout_ms);
        self.landmarks.left_eye = other.landmarks.left_eye.or(self.landmarks.left_eye);
        self.landmarks.right_eye = other.landmarks.right_eye.or(self.landmarks.right_eye);
        self.landmarks.nose_tip = other.landmarks.nose_tip.or(self.landmarks.nose_tip);

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("selfie-check").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.selfie-check.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG))
        .find(|path| path.exists())
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
