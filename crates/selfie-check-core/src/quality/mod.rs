//! Pre-detection image quality checks.
//!
//! Three cheap pixel heuristics run, in this order, before the landmark
//! detector is ever called:
//! - color presence (mean pairwise channel difference)
//! - saturation (mean HSV saturation)
//! - negative exposure (bright, low-contrast luminance)

mod color;
mod exposure;
mod saturation;

use serde::{Deserialize, Serialize};

use crate::domain::QualityCheck;

pub use color::{color_score, is_color_image, ColorCheck};
pub use exposure::{is_negative_image, luminance, ExposureAnalysis, ExposureCheck, Histogram};
pub use saturation::{has_enough_saturation, mean_saturation, SaturationCheck};

/// Thresholds for the quality checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityThresholds {
    /// Minimum mean channel difference for a color image (exclusive).
    pub color_threshold: f64,
    /// Minimum mean HSV saturation, 0-255 scale (exclusive).
    pub saturation_threshold: f64,
    /// Mean luminance above which an image may be a negative.
    pub negative_mean: f64,
    /// Luminance standard deviation below which a bright image is a negative.
    pub negative_std_dev: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            color_threshold: 10.0,
            saturation_threshold: 25.0,
            negative_mean: 170.0,
            negative_std_dev: 60.0,
        }
    }
}

/// Builds the quality checks in pipeline order.
#[must_use]
pub fn quality_checks(thresholds: &QualityThresholds) -> Vec<Box<dyn QualityCheck>> {
    vec![
        Box::new(ColorCheck::new(thresholds.color_threshold)),
        Box::new(SaturationCheck::new(thresholds.saturation_threshold)),
        Box::new(ExposureCheck::new(
            thresholds.negative_mean,
            thresholds.negative_std_dev,
        )),
    ]
}
