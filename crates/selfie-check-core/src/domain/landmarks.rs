//! Facial landmark types.

use serde::{Deserialize, Serialize};

/// MediaPipe face mesh indices used by the pose checks.
pub mod mediapipe {
    /// Left eye outer corner.
    pub const LEFT_EYE_OUTER: usize = 33;
    /// Right eye outer corner.
    pub const RIGHT_EYE_OUTER: usize = 263;
    /// Nose tip.
    pub const NOSE_TIP: usize = 1;
    /// Points in the face mesh without iris refinement.
    pub const MESH_POINTS: usize = 468;
    /// Points in the face mesh with iris refinement.
    pub const REFINED_MESH_POINTS: usize = 478;
}

/// A single landmark in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    /// Horizontal position in pixels.
    pub x: f64,
    /// Vertical position in pixels.
    pub y: f64,
}

impl LandmarkPoint {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Ordered landmarks of one detected face.
///
/// Indices are semantic: the detector model fixes which index is which point,
/// see [`LandmarkLayout`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LandmarkSet {
    points: Vec<LandmarkPoint>,
}

impl LandmarkSet {
    /// Wraps detector output.
    #[must_use]
    pub const fn new(points: Vec<LandmarkPoint>) -> Self {
        Self { points }
    }

    /// All points, in detector order.
    #[must_use]
    pub fn points(&self) -> &[LandmarkPoint] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at a semantic index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<LandmarkPoint> {
        self.points.get(index).copied()
    }
}

impl From<Vec<LandmarkPoint>> for LandmarkSet {
    fn from(points: Vec<LandmarkPoint>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<LandmarkPoint> for LandmarkSet {
    fn from_iter<I: IntoIterator<Item = LandmarkPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Which landmark indices carry the roles the pose checks need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandmarkLayout {
    /// Left eye outer corner.
    pub left_eye: usize,
    /// Right eye outer corner.
    pub right_eye: usize,
    /// Nose tip.
    pub nose_tip: usize,
}

impl LandmarkLayout {
    /// MediaPipe face mesh layout.
    pub const MEDIAPIPE: Self = Self {
        left_eye: mediapipe::LEFT_EYE_OUTER,
        right_eye: mediapipe::RIGHT_EYE_OUTER,
        nose_tip: mediapipe::NOSE_TIP,
    };

    /// Picks the pose points out of a landmark set.
    ///
    /// Returns `None` when the set is too short for this layout.
    #[must_use]
    pub fn pose_points(&self, landmarks: &LandmarkSet) -> Option<PosePoints> {
        Some(PosePoints {
            left_eye: landmarks.get(self.left_eye)?,
            right_eye: landmarks.get(self.right_eye)?,
            nose_tip: landmarks.get(self.nose_tip)?,
        })
    }
}

impl Default for LandmarkLayout {
    fn default() -> Self {
        Self::MEDIAPIPE
    }
}

/// The three landmarks used for pose checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PosePoints {
    /// Left eye outer corner.
    pub left_eye: LandmarkPoint,
    /// Right eye outer corner.
    pub right_eye: LandmarkPoint,
    /// Nose tip.
    pub nose_tip: LandmarkPoint,
}
