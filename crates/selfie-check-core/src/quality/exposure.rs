//! Negative-exposure check.
//!
//! Flags bright, low-contrast images: inverted negatives and washed-out scans
//! both have high mean luminance with a narrow tonal spread.

use image::{GrayImage, Luma, RgbImage};
use tracing::debug;

use crate::domain::{ImageInfo, QualityCheck, RejectionReason};

/// 256-bin histogram of luminance values.
#[derive(Debug, Clone)]
pub struct Histogram {
    bins: [u64; 256],
    total: u64,
}

impl Histogram {
    /// Compute histogram from grayscale image.
    #[must_use]
    pub fn from_luma(image: &GrayImage) -> Self {
        let mut bins = [0u64; 256];
        for pixel in image.pixels() {
            bins[usize::from(pixel.0[0])] += 1;
        }
        let total = bins.iter().sum();
        Self { bins, total }
    }

    /// Returns the total pixel count.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Calculate mean luminance.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let sum: u64 = self
            .bins
            .iter()
            .enumerate()
            .map(|(i, &count)| (i as u64) * count)
            .sum();
        sum as f64 / self.total as f64
    }

    /// Calculate population standard deviation of luminance.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let mean = self.mean();
        let variance: f64 = self
            .bins
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let diff = (i as f64) - mean;
                diff * diff * (count as f64)
            })
            .sum::<f64>()
            / (self.total as f64);
        variance.sqrt()
    }
}

/// Converts RGB to 8-bit luminance with BT.601 weights.
///
/// Fixed-point `0.299 R + 0.587 G + 0.114 B` with 14-bit coefficients, rounded.
#[must_use]
pub fn luminance(image: &RgbImage) -> GrayImage {
    const R: u32 = 4899;
    const G: u32 = 9617;
    const B: u32 = 1868;
    const SHIFT: u32 = 14;

    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        let y = (u32::from(r) * R + u32::from(g) * G + u32::from(b) * B + (1 << (SHIFT - 1)))
            >> SHIFT;
        // Weights sum to 1 << SHIFT, so y <= 255
        Luma([u8::try_from(y).unwrap_or(u8::MAX)])
    })
}

/// Luminance statistics of one image.
#[derive(Debug, Clone)]
pub struct ExposureAnalysis {
    /// Histogram of luminance values.
    pub histogram: Histogram,
    /// Mean luminance.
    pub mean: f64,
    /// Standard deviation of luminance.
    pub std_dev: f64,
}

impl ExposureAnalysis {
    /// Analyze luminance of a grayscale image.
    #[must_use]
    pub fn analyze(image: &GrayImage) -> Self {
        let histogram = Histogram::from_luma(image);
        let mean = histogram.mean();
        let std_dev = histogram.std_dev();
        Self {
            histogram,
            mean,
            std_dev,
        }
    }

    /// Bright and flat: mean above `max_mean` and spread below `min_std_dev`.
    #[must_use]
    pub fn is_negative(&self, max_mean: f64, min_std_dev: f64) -> bool {
        self.mean > max_mean && self.std_dev < min_std_dev
    }
}

/// Whether the image looks like a negative: mean luminance `> 170` and
/// standard deviation `< 60`.
#[must_use]
pub fn is_negative_image(image: &ImageInfo) -> bool {
    ExposureCheck::default().check(image).is_some()
}

/// Rejects negative and washed-out exposures.
#[derive(Debug, Clone)]
pub struct ExposureCheck {
    max_mean: f64,
    min_std_dev: f64,
}

impl ExposureCheck {
    /// Creates the check with the given luminance bounds.
    #[must_use]
    pub const fn new(max_mean: f64, min_std_dev: f64) -> Self {
        Self {
            max_mean,
            min_std_dev,
        }
    }
}

impl Default for ExposureCheck {
    fn default() -> Self {
        Self::new(170.0, 60.0)
    }
}

impl QualityCheck for ExposureCheck {
    fn name(&self) -> &'static str {
        "exposure"
    }

    fn check(&self, image: &ImageInfo) -> Option<RejectionReason> {
        let gray = if image.is_single_channel() {
            image.image.to_luma8()
        } else {
            luminance(&image.rgb8())
        };
        let analysis = ExposureAnalysis::analyze(&gray);
        debug!(
            "Luminance for {}: mean={:.2}, std_dev={:.2}",
            image.path, analysis.mean, analysis.std_dev
        );

        analysis
            .is_negative(self.max_mean, self.min_std_dev)
            .then_some(RejectionReason::NegativeExposure)
    }
}
