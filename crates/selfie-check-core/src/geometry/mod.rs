//! Face geometry validation.
//!
//! Turns the detector's landmark sets into an accept/reject decision. Checks
//! run in a fixed order and the first violation wins:
//!
//! 1. exactly one face
//! 2. usable landmarks (non-degenerate box, pose indices present)
//! 3. face area ratio
//! 4. centering
//! 5. aspect ratio
//! 6. eye level
//! 7. nose between the eyes

mod candidate;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{LandmarkLayout, LandmarkSet, PosePoints, RejectionReason, ValidationOutcome};

pub use candidate::FaceCandidate;

/// Thresholds for the geometry checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryThresholds {
    /// Minimum face area / image area. Ratios equal to this pass.
    pub min_face_ratio: f64,
    /// Maximum center offset, as a fraction of image width or height.
    pub max_center_offset: f64,
    /// Minimum face height / width.
    pub min_aspect_ratio: f64,
    /// Maximum face height / width.
    pub max_aspect_ratio: f64,
    /// Maximum vertical eye offset, as a fraction of face height.
    pub max_eye_tilt: f64,
    /// Maximum horizontal nose offset from the eye midpoint, as a fraction of face width.
    pub max_nose_offset: f64,
}

impl Default for GeometryThresholds {
    fn default() -> Self {
        Self {
            min_face_ratio: 0.15,
            max_center_offset: 0.15,
            min_aspect_ratio: 1.05,
            max_aspect_ratio: 1.7,
            max_eye_tilt: 0.05,
            max_nose_offset: 0.07,
        }
    }
}

/// Validates detected faces against the geometry thresholds.
#[derive(Debug, Clone, Default)]
pub struct GeometryValidator {
    thresholds: GeometryThresholds,
    layout: LandmarkLayout,
}

impl GeometryValidator {
    /// Creates a validator.
    #[must_use]
    pub const fn new(thresholds: GeometryThresholds, layout: LandmarkLayout) -> Self {
        Self { thresholds, layout }
    }

    /// Returns the thresholds in use.
    #[must_use]
    pub const fn thresholds(&self) -> &GeometryThresholds {
        &self.thresholds
    }

    /// Returns the landmark layout in use.
    #[must_use]
    pub const fn layout(&self) -> &LandmarkLayout {
        &self.layout
    }

    /// Decides on the faces found in a `width` x `height` image.
    #[must_use]
    pub fn validate(&self, width: u32, height: u32, faces: &[LandmarkSet]) -> ValidationOutcome {
        let landmarks = match faces {
            [] => return ValidationOutcome::invalid(RejectionReason::NoFaceDetected),
            [single] => single,
            many => {
                debug!("Rejecting {} faces", many.len());
                return ValidationOutcome::invalid(RejectionReason::MultipleFacesDetected);
            }
        };

        let Some(candidate) = FaceCandidate::from_landmarks(landmarks, width, height) else {
            debug!("Degenerate landmark set ({} points)", landmarks.len());
            return ValidationOutcome::invalid(RejectionReason::DetectionError);
        };

        let Some(pose) = self.layout.pose_points(landmarks) else {
            debug!(
                "Landmark set has {} points, layout needs {:?}",
                landmarks.len(),
                self.layout
            );
            return ValidationOutcome::invalid(RejectionReason::DetectionError);
        };

        match self.first_violation(&candidate, &pose, width, height) {
            Some(reason) => ValidationOutcome::invalid(reason),
            None => ValidationOutcome::valid(candidate.bbox()),
        }
    }

    /// Runs the size, placement and pose checks on a single face.
    fn first_violation(
        &self,
        candidate: &FaceCandidate,
        pose: &PosePoints,
        width: u32,
        height: u32,
    ) -> Option<RejectionReason> {
        let t = &self.thresholds;

        let ratio = candidate.area_ratio(width, height);
        debug!("Face/image area ratio: {ratio:.4}");
        if ratio < t.min_face_ratio {
            return Some(RejectionReason::FaceTooSmall);
        }

        let (dx, dy) = candidate.center_offset(width, height);
        debug!("Center offset: dx={dx:.4}, dy={dy:.4}");
        if dx > t.max_center_offset || dy > t.max_center_offset {
            return Some(RejectionReason::FaceNotCentered);
        }

        let aspect = candidate.aspect_ratio();
        debug!("Face aspect ratio: {aspect:.4}");
        if aspect < t.min_aspect_ratio || aspect > t.max_aspect_ratio {
            return Some(RejectionReason::InvalidAspectRatio);
        }

        let tilt = (pose.left_eye.y - pose.right_eye.y).abs();
        if tilt > t.max_eye_tilt * candidate.height() {
            debug!("Eye level difference {tilt:.2}px");
            return Some(RejectionReason::HeadTilted);
        }

        let eye_mid_x = (pose.left_eye.x + pose.right_eye.x) / 2.0;
        let nose_offset = (pose.nose_tip.x - eye_mid_x).abs();
        if nose_offset > t.max_nose_offset * candidate.width() {
            debug!("Nose offset from eye midpoint {nose_offset:.2}px");
            return Some(RejectionReason::FaceNotFrontal);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FaceBox, LandmarkPoint};

    /// Three-point layout: left eye, right eye, nose, then the box corners.
    const LAYOUT: LandmarkLayout = LandmarkLayout {
        left_eye: 0,
        right_eye: 1,
        nose_tip: 2,
    };

    fn face(
        bbox: (f64, f64, f64, f64),
        left: (f64, f64),
        right: (f64, f64),
        nose: (f64, f64),
    ) -> LandmarkSet {
        let (min_x, min_y, max_x, max_y) = bbox;
        [left, right, nose, (min_x, min_y), (max_x, max_y)]
            .into_iter()
            .map(|(x, y)| LandmarkPoint::new(x, y))
            .collect()
    }

    /// 100x100 image, face 40x50 centered, eyes level, nose centered.
    fn good_face() -> LandmarkSet {
        face((30.0, 25.0, 70.0, 75.0), (38.0, 40.0), (62.0, 40.0), (50.0, 55.0))
    }

    fn validator() -> GeometryValidator {
        GeometryValidator::new(GeometryThresholds::default(), LAYOUT)
    }

    fn reason(faces: &[LandmarkSet]) -> Option<RejectionReason> {
        validator().validate(100, 100, faces).reason()
    }

    #[test]
    fn test_default_thresholds() {
        let t = GeometryThresholds::default();
        assert!((t.min_face_ratio - 0.15).abs() < f64::EPSILON);
        assert!((t.max_center_offset - 0.15).abs() < f64::EPSILON);
        assert!((t.min_aspect_ratio - 1.05).abs() < f64::EPSILON);
        assert!((t.max_aspect_ratio - 1.7).abs() < f64::EPSILON);
        assert!((t.max_eye_tilt - 0.05).abs() < f64::EPSILON);
        assert!((t.max_nose_offset - 0.07).abs() < f64::EPSILON);
    }

    #[test]
    fn test_accepts_good_face() {
        let outcome = validator().validate(100, 100, &[good_face()]);
        assert_eq!(
            outcome,
            ValidationOutcome::valid(FaceBox::new(30.0, 25.0, 70.0, 75.0))
        );
    }

    #[test]
    fn test_no_face() {
        assert_eq!(reason(&[]), Some(RejectionReason::NoFaceDetected));
    }

    #[test]
    fn test_multiple_faces_regardless_of_geometry() {
        assert_eq!(
            reason(&[good_face(), good_face()]),
            Some(RejectionReason::MultipleFacesDetected)
        );
        assert_eq!(
            reason(&[LandmarkSet::default(), LandmarkSet::default(), good_face()]),
            Some(RejectionReason::MultipleFacesDetected)
        );
    }

    #[test]
    fn test_degenerate_landmarks_are_detection_errors() {
        assert_eq!(
            reason(&[LandmarkSet::default()]),
            Some(RejectionReason::DetectionError)
        );
        let flat = face((30.0, 50.0, 70.0, 50.0), (38.0, 50.0), (62.0, 50.0), (50.0, 50.0));
        assert_eq!(reason(&[flat]), Some(RejectionReason::DetectionError));
    }

    #[test]
    fn test_missing_layout_index_is_detection_error() {
        let v = GeometryValidator::new(GeometryThresholds::default(), LandmarkLayout::MEDIAPIPE);
        assert_eq!(
            v.validate(100, 100, &[good_face()]).reason(),
            Some(RejectionReason::DetectionError)
        );
    }

    #[test]
    fn test_face_too_small() {
        let small = face((40.0, 35.0, 60.0, 65.0), (44.0, 45.0), (56.0, 45.0), (50.0, 55.0));
        assert_eq!(reason(&[small]), Some(RejectionReason::FaceTooSmall));
    }

    #[test]
    fn test_face_ratio_boundary_inclusive() {
        // 30 x 50 = 1500 / 10000 = 0.15 exactly
        let exact = face((35.0, 25.0, 65.0, 75.0), (40.0, 40.0), (60.0, 40.0), (50.0, 55.0));
        assert!(validator().validate(100, 100, &[exact]).is_valid());

        // 30 x 49.9 just under
        let under = face((35.0, 25.0, 65.0, 74.9), (40.0, 40.0), (60.0, 40.0), (50.0, 55.0));
        assert_eq!(reason(&[under]), Some(RejectionReason::FaceTooSmall));
    }

    #[test]
    fn test_aspect_ratio_bounds_inclusive() {
        // 40 x 42 → 1.05 exactly
        let flat = face((30.0, 29.0, 70.0, 71.0), (38.0, 40.0), (62.0, 40.0), (50.0, 55.0));
        assert!(validator().validate(100, 100, &[flat]).is_valid());

        // 30 x 51 → 1.7 exactly
        let tall = face((35.0, 24.5, 65.0, 75.5), (40.0, 40.0), (60.0, 40.0), (50.0, 55.0));
        assert!(validator().validate(100, 100, &[tall]).is_valid());

        // 40 x 41.8 and 30 x 51.4 fall just outside
        let flatter = face((30.0, 29.1, 70.0, 70.9), (38.0, 40.0), (62.0, 40.0), (50.0, 55.0));
        assert_eq!(reason(&[flatter]), Some(RejectionReason::InvalidAspectRatio));
        let taller = face((35.0, 24.3, 65.0, 75.7), (40.0, 40.0), (60.0, 40.0), (50.0, 55.0));
        assert_eq!(reason(&[taller]), Some(RejectionReason::InvalidAspectRatio));
    }

    #[test]
    fn test_face_not_centered_horizontally() {
        // Center x = 68 → dx = 0.18
        let off = face((48.0, 25.0, 88.0, 75.0), (56.0, 40.0), (80.0, 40.0), (68.0, 55.0));
        assert_eq!(reason(&[off]), Some(RejectionReason::FaceNotCentered));
    }

    #[test]
    fn test_face_not_centered_vertically() {
        // Center y = 34 → dy = 0.16
        let off = face((30.0, 9.0, 70.0, 59.0), (38.0, 24.0), (62.0, 24.0), (50.0, 39.0));
        assert_eq!(reason(&[off]), Some(RejectionReason::FaceNotCentered));
    }

    #[test]
    fn test_center_offset_boundary_inclusive() {
        // Center x = 65 → dx = 0.15 exactly, allowed
        let edge = face((45.0, 25.0, 85.0, 75.0), (53.0, 40.0), (77.0, 40.0), (65.0, 55.0));
        assert!(validator().validate(100, 100, &[edge]).is_valid());
    }

    #[test]
    fn test_aspect_ratio_too_flat() {
        // 50 x 50 → 1.0
        let square = face((25.0, 25.0, 75.0, 75.0), (35.0, 40.0), (65.0, 40.0), (50.0, 55.0));
        assert_eq!(reason(&[square]), Some(RejectionReason::InvalidAspectRatio));
    }

    #[test]
    fn test_aspect_ratio_too_tall() {
        // 30 x 60 → 2.0
        let tall = face((35.0, 20.0, 65.0, 80.0), (40.0, 40.0), (60.0, 40.0), (50.0, 55.0));
        assert_eq!(reason(&[tall]), Some(RejectionReason::InvalidAspectRatio));
    }

    #[test]
    fn test_head_tilted() {
        // Face height 50 → limit 2.5px
        let tilted = face((30.0, 25.0, 70.0, 75.0), (38.0, 40.0), (62.0, 43.0), (50.0, 55.0));
        assert_eq!(reason(&[tilted]), Some(RejectionReason::HeadTilted));

        let slight = face((30.0, 25.0, 70.0, 75.0), (38.0, 40.0), (62.0, 42.0), (50.0, 55.0));
        assert!(validator().validate(100, 100, &[slight]).is_valid());
    }

    #[test]
    fn test_face_not_frontal() {
        // Face width 40 → limit 2.8px
        let turned = face((30.0, 25.0, 70.0, 75.0), (38.0, 40.0), (62.0, 40.0), (53.0, 55.0));
        assert_eq!(reason(&[turned]), Some(RejectionReason::FaceNotFrontal));

        let slight = face((30.0, 25.0, 70.0, 75.0), (38.0, 40.0), (62.0, 40.0), (52.5, 55.0));
        assert!(validator().validate(100, 100, &[slight]).is_valid());
    }

    #[test]
    fn test_first_violation_wins() {
        // Small, off-center, square, tilted, turned: only size is reported
        let bad = face((0.0, 0.0, 20.0, 20.0), (2.0, 2.0), (18.0, 10.0), (15.0, 15.0));
        assert_eq!(reason(&[bad]), Some(RejectionReason::FaceTooSmall));

        // Centered and large but tilted and turned: tilt comes first
        let posed = face((30.0, 25.0, 70.0, 75.0), (38.0, 40.0), (62.0, 48.0), (60.0, 55.0));
        assert_eq!(reason(&[posed]), Some(RejectionReason::HeadTilted));
    }

    #[test]
    fn test_custom_thresholds() {
        let lenient = GeometryThresholds {
            min_face_ratio: 0.01,
            ..GeometryThresholds::default()
        };
        let small = face((40.0, 35.0, 60.0, 65.0), (44.0, 45.0), (56.0, 45.0), (50.0, 55.0));
        let v = GeometryValidator::new(lenient, LAYOUT);
        assert!(v.validate(100, 100, &[small]).is_valid());
        assert!((v.thresholds().min_face_ratio - 0.01).abs() < f64::EPSILON);
        assert_eq!(v.layout(), &LAYOUT);
    }
}
