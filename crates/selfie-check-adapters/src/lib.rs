//! Selfie Check Adapters - External adapters for selfie-check.
//!
//! This crate provides adapters for:
//! - Filesystem image source
//! - Landmark sidecar files written by an external detector
//! - Deadline enforcement around slow landmark providers

pub mod deadline;
pub mod fs;
pub mod landmarks;

pub use deadline::DeadlineLandmarkProvider;
pub use fs::{load_image, FsImageSource};
pub use landmarks::{CoordinateSpace, SidecarFile, SidecarLandmarkProvider, SIDECAR_SUFFIX};
