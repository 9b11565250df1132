//! Selfie Check Core - Domain logic for selfie validation
//!
//! This crate contains the domain types, ports, and the validation pipeline
//! that decides whether a photo is usable as an identity-verification selfie:
//! pixel quality checks first, then geometry checks on the facial landmarks
//! returned by an external detector.

pub mod domain;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod ports;
pub mod quality;

pub use domain::{
    FaceBox, ImageDimensions, ImageInfo, LandmarkLayout, LandmarkPoint, LandmarkSet,
    RejectionCategory, RejectionReason, ValidationOutcome, ValidationReport,
};
pub use error::DetectionError;
pub use geometry::{FaceCandidate, GeometryThresholds, GeometryValidator};
pub use pipeline::{PipelineSettings, ValidationPipeline};
pub use ports::{ImageSource, LandmarkProvider, ProgressEvent, ProgressSink, ResultOutput};
pub use quality::QualityThresholds;
