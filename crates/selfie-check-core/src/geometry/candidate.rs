//! Face candidate derived from a landmark set.

use crate::domain::{FaceBox, ImageDimensions, LandmarkSet};

/// Bounding-box measurements of one detected face.
///
/// Always non-degenerate: width and height are strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceCandidate {
    bbox: FaceBox,
}

impl FaceCandidate {
    /// Derives the candidate from the extreme landmark coordinates, clamped to
    /// `[0, width] x [0, height]`.
    ///
    /// Returns `None` for an empty set, non-finite coordinates, or a box with
    /// zero width or height after clamping.
    #[must_use]
    pub fn from_landmarks(landmarks: &LandmarkSet, width: u32, height: u32) -> Option<Self> {
        let (first, rest) = landmarks.points().split_first()?;
        if !first.is_finite() || rest.iter().any(|p| !p.is_finite()) {
            return None;
        }

        let init = (first.x, first.y, first.x, first.y);
        let (min_x, min_y, max_x, max_y) =
            rest.iter().fold(init, |(min_x, min_y, max_x, max_y), p| {
                (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
            });

        let w = f64::from(width);
        let h = f64::from(height);
        let bbox = FaceBox::new(
            min_x.clamp(0.0, w),
            min_y.clamp(0.0, h),
            max_x.clamp(0.0, w),
            max_y.clamp(0.0, h),
        );

        if bbox.width() <= 0.0 || bbox.height() <= 0.0 {
            return None;
        }
        Some(Self { bbox })
    }

    /// Clamped bounding box.
    #[must_use]
    pub const fn bbox(&self) -> FaceBox {
        self.bbox
    }

    /// Face width in pixels.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.bbox.width()
    }

    /// Face height in pixels.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bbox.height()
    }

    /// Face area divided by image area.
    #[must_use]
    pub fn area_ratio(&self, width: u32, height: u32) -> f64 {
        self.bbox.area() / ImageDimensions::new(width, height).area()
    }

    /// Distance of the face center from the image center, as fractions of
    /// image width and height.
    #[must_use]
    pub fn center_offset(&self, width: u32, height: u32) -> (f64, f64) {
        let (cx, cy) = self.bbox.center();
        let w = f64::from(width);
        let h = f64::from(height);
        ((cx - w / 2.0).abs() / w, (cy - h / 2.0).abs() / h)
    }

    /// Height over width.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        self.height() / self.width()
    }
}
