//! Core domain types for selfie validation.

mod landmarks;
mod outcome;
mod quality_check;
mod result;

pub use landmarks::{mediapipe, LandmarkLayout, LandmarkPoint, LandmarkSet, PosePoints};
pub use outcome::{FaceBox, RejectionCategory, RejectionReason, ValidationOutcome, VALID_MESSAGE};
pub use quality_check::QualityCheck;
pub use result::{ImageDimensions, ImageInfo, ValidationReport};
