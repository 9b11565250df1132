//! Landmark provider port for the external face landmark detector.

use std::sync::Arc;

use crate::domain::{ImageInfo, LandmarkSet};
use crate::error::DetectionError;

/// Port for the facial landmark detector.
///
/// Implementations return one [`LandmarkSet`] per detected face, in pixel
/// coordinates, with indices matching the configured
/// [`LandmarkLayout`](crate::LandmarkLayout). An empty vector means no face
/// was found; an error means detection itself failed.
pub trait LandmarkProvider: Send + Sync {
    /// Detects faces in an image.
    ///
    /// # Errors
    ///
    /// Returns an error if the detector cannot process the image.
    fn detect(&self, image: &ImageInfo) -> Result<Vec<LandmarkSet>, DetectionError>;
}

impl<P: LandmarkProvider + ?Sized> LandmarkProvider for Arc<P> {
    fn detect(&self, image: &ImageInfo) -> Result<Vec<LandmarkSet>, DetectionError> {
        (**self).detect(image)
    }
}

impl<P: LandmarkProvider + ?Sized> LandmarkProvider for &P {
    fn detect(&self, image: &ImageInfo) -> Result<Vec<LandmarkSet>, DetectionError> {
        (**self).detect(image)
    }
}
