//! Test support utilities for selfie-check.
//!
//! Provides mocks, synthetic image and landmark builders for testing the
//! selfie validation pipeline.
//!
//! # Example
//!
//! ```
//! use selfie_check_test_support::{
//!     FaceLandmarksBuilder, MockLandmarkProvider, SyntheticImageBuilder,
//! };
//!
//! // A colorful 1000x1000 backdrop and a centered frontal face
//! let image = SyntheticImageBuilder::selfie_image();
//! let face = FaceLandmarksBuilder::standard().build();
//!
//! // A provider that reports that face for every image
//! let provider = MockLandmarkProvider::with_face(face);
//! # let _ = (image, provider);
//! ```

mod builders;
mod mocks;

pub use builders::{FaceLandmarksBuilder, SyntheticImageBuilder, DARK_TONE, LIGHT_TONE};
pub use mocks::{MockImageSource, MockLandmarkProvider, MockProgressSink, MockResultOutput};
