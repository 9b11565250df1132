//! Saturation check.
//!
//! Uses the 8-bit HSV convention: `S = 255 * (max - min) / max`, zero for
//! black pixels.

use image::{Rgb, RgbImage};
use tracing::debug;

use crate::domain::{ImageInfo, QualityCheck, RejectionReason};

/// HSV saturation of one pixel on the 0-255 scale.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pixel_saturation(pixel: &Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0;
    let max = r.max(g).max(b);
    if max == 0 {
        return 0;
    }
    let min = r.min(g).min(b);
    // Bounded to 0-255 since min <= max
    (255.0 * f64::from(max - min) / f64::from(max)).round() as u8
}

/// Mean HSV saturation over all pixels (0-255).
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn mean_saturation(image: &RgbImage) -> f64 {
    let pixels = u64::from(image.width()) * u64::from(image.height());
    if pixels == 0 {
        return 0.0;
    }
    let sum: u64 = image
        .pixels()
        .map(|p| u64::from(pixel_saturation(p)))
        .sum();
    sum as f64 / pixels as f64
}

/// Whether mean saturation exceeds `threshold`.
#[must_use]
pub fn has_enough_saturation(image: &ImageInfo, threshold: f64) -> bool {
    let mean = mean_saturation(&image.rgb8());
    debug!("Mean saturation for {}: {mean:.2}", image.path);
    mean > threshold
}

/// Rejects washed-out, nearly colorless photos.
#[derive(Debug, Clone)]
pub struct SaturationCheck {
    threshold: f64,
}

impl SaturationCheck {
    /// Creates the check with the given saturation threshold (0-255 scale).
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl QualityCheck for SaturationCheck {
    fn name(&self) -> &'static str {
        "saturation"
    }

    fn check(&self, image: &ImageInfo) -> Option<RejectionReason> {
        (!has_enough_saturation(image, self.threshold)).then_some(RejectionReason::LowSaturation)
    }
}
