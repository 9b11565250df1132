//! Color presence check.

use image::RgbImage;
use tracing::debug;

use crate::domain::{ImageInfo, QualityCheck, RejectionReason};

/// Mean absolute pairwise channel difference, averaged over R-G, R-B and G-B.
///
/// Zero for an image whose three channels are identical.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn color_score(image: &RgbImage) -> f64 {
    let pixels = u64::from(image.width()) * u64::from(image.height());
    if pixels == 0 {
        return 0.0;
    }

    let (mut rg, mut rb, mut gb) = (0u64, 0u64, 0u64);
    for pixel in image.pixels() {
        let [r, g, b] = pixel.0;
        rg += u64::from(r.abs_diff(g));
        rb += u64::from(r.abs_diff(b));
        gb += u64::from(g.abs_diff(b));
    }

    let n = pixels as f64;
    (rg as f64 / n + rb as f64 / n + gb as f64 / n) / 3.0
}

/// Whether the image carries real color information.
///
/// Single-channel images are never color images, whatever the threshold.
#[must_use]
pub fn is_color_image(image: &ImageInfo, threshold: f64) -> bool {
    if image.is_single_channel() {
        return false;
    }
    let score = color_score(&image.rgb8());
    debug!("Color score for {}: {score:.2}", image.path);
    score > threshold
}

/// Rejects grayscale photos.
#[derive(Debug, Clone)]
pub struct ColorCheck {
    threshold: f64,
}

impl ColorCheck {
    /// Creates the check with the given color score threshold.
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl QualityCheck for ColorCheck {
    fn name(&self) -> &'static str {
        "color"
    }

    fn check(&self, image: &ImageInfo) -> Option<RejectionReason> {
        (!is_color_image(image, self.threshold)).then_some(RejectionReason::NotColorImage)
    }
}
