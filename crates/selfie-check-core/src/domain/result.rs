//! Image and report types.

use std::borrow::Cow;

use image::RgbImage;
use serde::{Deserialize, Serialize};

use super::ValidationOutcome;

/// Validation report for a single image, as emitted by batch runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Path to the validated image.
    pub path: String,
    /// Timestamp of validation (ISO 8601).
    pub timestamp: String,
    /// Image dimensions.
    pub dimensions: ImageDimensions,
    /// Accept/reject decision.
    pub outcome: ValidationOutcome,
    /// User-facing message for the outcome.
    pub message: String,
}

impl ValidationReport {
    /// Builds a report for `image` from a pipeline outcome.
    #[must_use]
    pub fn new(image: &ImageInfo, timestamp: impl Into<String>, outcome: ValidationOutcome) -> Self {
        Self {
            path: image.path.clone(),
            timestamp: timestamp.into(),
            dimensions: image.dimensions(),
            outcome,
            message: outcome.message().to_string(),
        }
    }
}

/// Image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageDimensions {
    /// Creates a new dimensions value.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixel area as a float, for ratio computations.
    #[must_use]
    pub fn area(self) -> f64 {
        f64::from(self.width) * f64::from(self.height)
    }
}

/// A decoded image handed to the validation pipeline.
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Path (or synthetic identifier) of the image.
    pub path: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Decoded image data.
    pub image: image::DynamicImage,
}

impl ImageInfo {
    /// Wraps a decoded image, reading its dimensions.
    #[must_use]
    pub fn new(path: impl Into<String>, image: image::DynamicImage) -> Self {
        Self {
            path: path.into(),
            width: image.width(),
            height: image.height(),
            image,
        }
    }

    /// Returns the image dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(self.width, self.height)
    }

    /// Whether the buffer was decoded without color channels (gray or gray+alpha).
    #[must_use]
    pub fn is_single_channel(&self) -> bool {
        !self.image.color().has_color()
    }

    /// Returns the pixels as 8-bit RGB, borrowing when already in that layout.
    #[must_use]
    pub fn rgb8(&self) -> Cow<'_, RgbImage> {
        self.image
            .as_rgb8()
            .map_or_else(|| Cow::Owned(self.image.to_rgb8()), Cow::Borrowed)
    }
}
