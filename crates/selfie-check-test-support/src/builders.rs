//! Synthetic image and landmark builders for testing.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use selfie_check_core::domain::{mediapipe, FaceBox, ImageInfo, LandmarkPoint, LandmarkSet};

/// Light tone of the two-tone selfie backdrop (luma 204, saturation 41).
pub const LIGHT_TONE: [u8; 3] = [220, 200, 185];
/// Dark tone of the two-tone selfie backdrop (luma 42, saturation 74).
pub const DARK_TONE: [u8; 3] = [48, 40, 34];

/// Builder for creating synthetic test images.
///
/// Each constructor targets one outcome of the quality checks.
pub struct SyntheticImageBuilder;

impl SyntheticImageBuilder {
    // === Images that pass every quality check ===

    /// Creates a two-tone color checkerboard with 4px cells.
    ///
    /// Color score ≈ 16, mean saturation ≈ 57, luminance mean ≈ 123 with
    /// std ≈ 81: passes color, saturation and exposure checks.
    #[must_use]
    pub fn selfie_backdrop(width: u32, height: u32) -> ImageInfo {
        let img = RgbImage::from_fn(width, height, |x, y| {
            if (x / 4 + y / 4) % 2 == 0 {
                Rgb(LIGHT_TONE)
            } else {
                Rgb(DARK_TONE)
            }
        });
        ImageInfo::new("synthetic://selfie", DynamicImage::ImageRgb8(img))
    }

    /// Returns the standard 1000x1000 selfie backdrop.
    #[must_use]
    pub fn selfie_image() -> ImageInfo {
        Self::selfie_backdrop(1000, 1000)
    }

    // === Images failing the color check ===

    /// Creates a single-channel uniform gray image.
    #[must_use]
    pub fn uniform_gray(width: u32, height: u32, value: u8) -> ImageInfo {
        let img = GrayImage::from_fn(width, height, |_, _| Luma([value]));
        ImageInfo::new("synthetic://uniform_gray", DynamicImage::ImageLuma8(img))
    }

    /// Creates a grayscale gradient stored in three identical RGB channels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn rgb_encoded_gray(width: u32, height: u32) -> ImageInfo {
        let img = RgbImage::from_fn(width, height, |x, _| {
            let v = ((u32::from(u8::MAX) * x) / width.max(1)) as u8;
            Rgb([v, v, v])
        });
        ImageInfo::new("synthetic://rgb_gray", DynamicImage::ImageRgb8(img))
    }

    // === Images failing the saturation check ===

    /// Creates a pastel image: color score 16 but saturation 24.
    #[must_use]
    pub fn pastel(width: u32, height: u32) -> ImageInfo {
        Self::rgb_uniform(width, height, 250, 235, 226)
    }

    // === Images failing the exposure check ===

    /// Creates a bright, flat, saturated image (luma 230, std 0).
    #[must_use]
    pub fn washed_out(width: u32, height: u32) -> ImageInfo {
        Self::rgb_uniform(width, height, 250, 225, 205)
    }

    // === Primitives ===

    /// Creates an RGB color image.
    #[must_use]
    pub fn rgb_uniform(width: u32, height: u32, r: u8, g: u8, b: u8) -> ImageInfo {
        let img = RgbImage::from_fn(width, height, |_, _| Rgb([r, g, b]));
        ImageInfo::new("synthetic://rgb_uniform", DynamicImage::ImageRgb8(img))
    }

    /// Creates a 1x1 pixel color image (edge case).
    #[must_use]
    pub fn single_pixel(r: u8, g: u8, b: u8) -> ImageInfo {
        Self::rgb_uniform(1, 1, r, g, b)
    }
}

/// Builder for MediaPipe-layout landmark sets.
///
/// Produces a full mesh whose extreme points span the requested box, with the
/// eye corners and nose tip at the MediaPipe indices. All other points sit at
/// the box center.
#[derive(Debug, Clone)]
pub struct FaceLandmarksBuilder {
    bbox: FaceBox,
    left_eye: LandmarkPoint,
    right_eye: LandmarkPoint,
    nose_tip: LandmarkPoint,
    points: usize,
}

/// Forehead top, chin, left and right cheek contour indices.
const CONTOUR: [usize; 4] = [10, 152, 234, 454];

impl FaceLandmarksBuilder {
    /// Starts a frontal face filling `bbox`: eyes level at 40% of the height,
    /// 20% in from each side, nose centered at 60%.
    #[must_use]
    pub fn new(bbox: FaceBox) -> Self {
        let (cx, _) = bbox.center();
        let eye_y = bbox.min_y + bbox.height() * 0.4;
        Self {
            bbox,
            left_eye: LandmarkPoint::new(bbox.min_x + bbox.width() * 0.2, eye_y),
            right_eye: LandmarkPoint::new(bbox.max_x - bbox.width() * 0.2, eye_y),
            nose_tip: LandmarkPoint::new(cx, bbox.min_y + bbox.height() * 0.6),
            points: mediapipe::REFINED_MESH_POINTS,
        }
    }

    /// A frontal face of `face_width` x `face_height` centered in the image.
    #[must_use]
    pub fn centered(image_width: u32, image_height: u32, face_width: f64, face_height: f64) -> Self {
        let cx = f64::from(image_width) / 2.0;
        let cy = f64::from(image_height) / 2.0;
        Self::new(FaceBox::new(
            cx - face_width / 2.0,
            cy - face_height / 2.0,
            cx + face_width / 2.0,
            cy + face_height / 2.0,
        ))
    }

    /// The accepted face of the standard scenario: a 400x480 box centered in
    /// a 1000x1000 image (ratio 0.192, aspect 1.2).
    #[must_use]
    pub fn standard() -> Self {
        Self::new(FaceBox::new(300.0, 260.0, 700.0, 740.0))
    }

    /// Sets the left eye outer corner.
    #[must_use]
    pub const fn left_eye(mut self, x: f64, y: f64) -> Self {
        self.left_eye = LandmarkPoint::new(x, y);
        self
    }

    /// Sets the right eye outer corner.
    #[must_use]
    pub const fn right_eye(mut self, x: f64, y: f64) -> Self {
        self.right_eye = LandmarkPoint::new(x, y);
        self
    }

    /// Moves the right eye vertically by `dy` pixels.
    #[must_use]
    pub fn tilt_right_eye(mut self, dy: f64) -> Self {
        self.right_eye.y += dy;
        self
    }

    /// Moves the nose tip horizontally by `dx` pixels.
    #[must_use]
    pub fn turn_nose(mut self, dx: f64) -> Self {
        self.nose_tip.x += dx;
        self
    }

    /// Sets the number of mesh points (default 478).
    #[must_use]
    pub const fn with_point_count(mut self, points: usize) -> Self {
        self.points = points;
        self
    }

    /// Returns the box the face spans.
    #[must_use]
    pub const fn bbox(&self) -> FaceBox {
        self.bbox
    }

    /// Builds the landmark set in pixel coordinates.
    #[must_use]
    pub fn build(&self) -> LandmarkSet {
        let (cx, cy) = self.bbox.center();
        let mut points = vec![LandmarkPoint::new(cx, cy); self.points];

        let contour = [
            LandmarkPoint::new(cx, self.bbox.min_y),
            LandmarkPoint::new(cx, self.bbox.max_y),
            LandmarkPoint::new(self.bbox.min_x, cy),
            LandmarkPoint::new(self.bbox.max_x, cy),
        ];
        for (index, point) in CONTOUR.into_iter().zip(contour) {
            if let Some(slot) = points.get_mut(index) {
                *slot = point;
            }
        }

        for (index, point) in [
            (mediapipe::LEFT_EYE_OUTER, self.left_eye),
            (mediapipe::RIGHT_EYE_OUTER, self.right_eye),
            (mediapipe::NOSE_TIP, self.nose_tip),
        ] {
            if let Some(slot) = points.get_mut(index) {
                *slot = point;
            }
        }

        LandmarkSet::new(points)
    }

    /// Builds `[x, y]` pairs scaled into `[0, 1]` by the image size, the way a
    /// detector writes normalized output.
    #[must_use]
    pub fn normalized(&self, image_width: u32, image_height: u32) -> Vec<[f64; 2]> {
        let w = f64::from(image_width);
        let h = f64::from(image_height);
        self.build()
            .points()
            .iter()
            .map(|p| [p.x / w, p.y / h])
            .collect()
    }
}
