//! Quality check trait for pre-detection image heuristics.

use super::{ImageInfo, RejectionReason};

/// A pixel-level check run before any face detection.
///
/// Checks are pure: they look only at the pixels and their own thresholds.
pub trait QualityCheck: Send + Sync {
    /// Returns the name of this check.
    fn name(&self) -> &'static str;

    /// Inspects an image.
    ///
    /// # Returns
    ///
    /// The rejection reason if the image fails this check, `None` otherwise.
    fn check(&self, image: &ImageInfo) -> Option<RejectionReason>;
}
