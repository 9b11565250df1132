//! Validation outcome and rejection reasons.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Axis-aligned face bounding box in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceBox {
    /// Left edge.
    pub min_x: f64,
    /// Top edge.
    pub min_y: f64,
    /// Right edge.
    pub max_x: f64,
    /// Bottom edge.
    pub max_y: f64,
}

impl FaceBox {
    /// Creates a box from its edges.
    #[must_use]
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Box width (`max_x - min_x`).
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Box height (`max_y - min_y`).
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Box area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Box center `(x, y)`.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// Why an image was rejected.
///
/// Variants are listed in pipeline order: a later reason is only ever
/// reported when every earlier stage passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Channels are (nearly) identical, or the image has a single channel.
    NotColorImage,
    /// Mean HSV saturation too low.
    LowSaturation,
    /// Bright, low-contrast image typical of negatives and washed-out scans.
    NegativeExposure,
    /// The landmark provider failed or returned unusable landmarks.
    DetectionError,
    /// No face found.
    NoFaceDetected,
    /// More than one face found.
    MultipleFacesDetected,
    /// Face covers too little of the frame.
    FaceTooSmall,
    /// Face center too far from the image center.
    FaceNotCentered,
    /// Face height/width ratio out of range.
    InvalidAspectRatio,
    /// Outer eye corners not level.
    HeadTilted,
    /// Nose tip not between the eyes.
    FaceNotFrontal,
}

/// Broad class of a rejection, used to pick the user-facing remedy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionCategory {
    /// Pixel-level quality problem; re-upload a better photo.
    InputQuality,
    /// Detector failure; retrying may help.
    Detection,
    /// Face count, size, placement or pose problem; re-upload.
    Geometry,
}

impl RejectionReason {
    /// Every reason, in pipeline order.
    pub const ALL: [Self; 11] = [
        Self::NotColorImage,
        Self::LowSaturation,
        Self::NegativeExposure,
        Self::DetectionError,
        Self::NoFaceDetected,
        Self::MultipleFacesDetected,
        Self::FaceTooSmall,
        Self::FaceNotCentered,
        Self::InvalidAspectRatio,
        Self::HeadTilted,
        Self::FaceNotFrontal,
    ];

    /// Stable machine-readable code (matches the serialized form).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotColorImage => "not_color_image",
            Self::LowSaturation => "low_saturation",
            Self::NegativeExposure => "negative_exposure",
            Self::DetectionError => "detection_error",
            Self::NoFaceDetected => "no_face_detected",
            Self::MultipleFacesDetected => "multiple_faces_detected",
            Self::FaceTooSmall => "face_too_small",
            Self::FaceNotCentered => "face_not_centered",
            Self::InvalidAspectRatio => "invalid_aspect_ratio",
            Self::HeadTilted => "head_tilted",
            Self::FaceNotFrontal => "face_not_frontal",
        }
    }

    /// Message shown to the person who uploaded the photo.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotColorImage => "Uploaded image is not a color image",
            Self::LowSaturation => "Image has very low color information",
            Self::NegativeExposure => "Uploaded image looks like a negative or is washed out",
            Self::DetectionError => "Face detection failed, please try again",
            Self::NoFaceDetected => "No face detected",
            Self::MultipleFacesDetected => "Multiple faces detected",
            Self::FaceTooSmall => "Face too small / background too dominant",
            Self::FaceNotCentered => "Face not centered",
            Self::InvalidAspectRatio => "Invalid aspect ratio",
            Self::HeadTilted => "Head tilted",
            Self::FaceNotFrontal => "Face not frontal",
        }
    }

    /// Taxonomy class of this reason.
    #[must_use]
    pub const fn category(self) -> RejectionCategory {
        match self {
            Self::NotColorImage | Self::LowSaturation | Self::NegativeExposure => {
                RejectionCategory::InputQuality
            }
            Self::DetectionError => RejectionCategory::Detection,
            Self::NoFaceDetected
            | Self::MultipleFacesDetected
            | Self::FaceTooSmall
            | Self::FaceNotCentered
            | Self::InvalidAspectRatio
            | Self::HeadTilted
            | Self::FaceNotFrontal => RejectionCategory::Geometry,
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of validating one image. Exactly one variant per call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// The image is an acceptable selfie.
    Valid {
        /// Face bounding box in pixels.
        bounding_box: FaceBox,
    },
    /// The image was rejected by the first failing check.
    Invalid {
        /// Rejection reason.
        reason: RejectionReason,
    },
}

/// Message for accepted images.
pub const VALID_MESSAGE: &str = "Valid face image";

impl ValidationOutcome {
    /// Accepting outcome.
    #[must_use]
    pub const fn valid(bounding_box: FaceBox) -> Self {
        Self::Valid { bounding_box }
    }

    /// Rejecting outcome.
    #[must_use]
    pub const fn invalid(reason: RejectionReason) -> Self {
        Self::Invalid { reason }
    }

    /// Whether the image was accepted.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Bounding box of an accepted face.
    #[must_use]
    pub const fn bounding_box(&self) -> Option<FaceBox> {
        match self {
            Self::Valid { bounding_box } => Some(*bounding_box),
            Self::Invalid { .. } => None,
        }
    }

    /// Rejection reason of a rejected image.
    #[must_use]
    pub const fn reason(&self) -> Option<RejectionReason> {
        match self {
            Self::Valid { .. } => None,
            Self::Invalid { reason } => Some(*reason),
        }
    }

    /// User-facing message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Valid { .. } => VALID_MESSAGE,
            Self::Invalid { reason } => reason.message(),
        }
    }
}
