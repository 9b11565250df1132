//! Errors reported by landmark providers.

use std::time::Duration;

use thiserror::Error;

/// Failure of the external landmark detector.
///
/// The pipeline never propagates these: each becomes
/// [`RejectionReason::DetectionError`](crate::RejectionReason::DetectionError).
#[derive(Debug, Error)]
pub enum DetectionError {
    /// No landmark data exists for the image.
    #[error("no landmarks available for {0}")]
    LandmarksNotFound(String),

    /// Landmark data exists but cannot be used.
    #[error("malformed landmark data: {0}")]
    Malformed(String),

    /// The detector did not answer in time.
    #[error("landmark detection timed out after {0:?}")]
    Timeout(Duration),

    /// Any other detector failure.
    #[error("landmark detector failed: {0}")]
    Backend(String),
}
