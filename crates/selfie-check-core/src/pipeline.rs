//! Selfie validation pipeline.
//!
//! Quality checks → one landmark detection → geometry checks, stopping at the
//! first rejection. The pipeline keeps no state between calls.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{ImageInfo, LandmarkLayout, QualityCheck, RejectionReason, ValidationOutcome};
use crate::geometry::{GeometryThresholds, GeometryValidator};
use crate::ports::LandmarkProvider;
use crate::quality::{quality_checks, QualityThresholds};

/// Tunable settings for a pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// Quality check thresholds.
    pub quality: QualityThresholds,
    /// Geometry check thresholds.
    pub geometry: GeometryThresholds,
    /// Semantic landmark indices of the provider's model.
    pub layout: LandmarkLayout,
}

/// Validates images as identity-verification selfies.
pub struct ValidationPipeline<P> {
    provider: P,
    checks: Vec<Box<dyn QualityCheck>>,
    geometry: GeometryValidator,
}

impl<P: LandmarkProvider> ValidationPipeline<P> {
    /// Creates a pipeline with default thresholds and the MediaPipe layout.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self::with_settings(provider, PipelineSettings::default())
    }

    /// Creates a pipeline with explicit settings.
    #[must_use]
    pub fn with_settings(provider: P, settings: PipelineSettings) -> Self {
        Self {
            provider,
            checks: quality_checks(&settings.quality),
            geometry: GeometryValidator::new(settings.geometry, settings.layout),
        }
    }

    /// Returns the landmark provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Validates one image.
    ///
    /// Never fails: detector errors become
    /// [`RejectionReason::DetectionError`].
    pub fn validate(&self, image: &ImageInfo) -> ValidationOutcome {
        for check in &self.checks {
            if let Some(reason) = check.check(image) {
                debug!("{}: {} check failed", image.path, check.name());
                return ValidationOutcome::invalid(reason);
            }
        }

        let faces = match self.provider.detect(image) {
            Ok(faces) => faces,
            Err(e) => {
                warn!("Landmark detection failed for {}: {e}", image.path);
                return ValidationOutcome::invalid(RejectionReason::DetectionError);
            }
        };
        debug!("{}: {} face(s) detected", image.path, faces.len());

        self.geometry.validate(image.width, image.height, &faces)
    }
}
