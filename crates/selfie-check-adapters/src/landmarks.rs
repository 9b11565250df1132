//! Landmark sidecar adapter.
//!
//! Reads face landmarks produced by an external detector run from JSON files
//! stored next to the images (or in one shared directory):
//!
//! ```json
//! { "coordinates": "normalized", "faces": [ [[0.51, 0.32], [0.49, 0.40]] ] }
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use selfie_check_core::domain::{ImageInfo, LandmarkPoint, LandmarkSet};
use selfie_check_core::{DetectionError, LandmarkProvider};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// File name suffix appended to the image file name.
pub const SIDECAR_SUFFIX: &str = ".landmarks.json";

/// Coordinate space of the points in a sidecar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateSpace {
    /// `[0, 1]` fractions of image width and height.
    #[default]
    Normalized,
    /// Pixel coordinates.
    Pixel,
}

/// On-disk sidecar document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidecarFile {
    /// Coordinate space of every point.
    #[serde(default)]
    pub coordinates: CoordinateSpace,
    /// One `[x, y]` list per detected face.
    pub faces: Vec<Vec<[f64; 2]>>,
}

impl SidecarFile {
    /// Converts the faces to pixel-space landmark sets.
    ///
    /// Normalized coordinates are scaled by the image size and truncated to
    /// whole pixels.
    #[must_use]
    pub fn into_landmarks(self, width: u32, height: u32) -> Vec<LandmarkSet> {
        let (sx, sy) = match self.coordinates {
            CoordinateSpace::Normalized => (f64::from(width), f64::from(height)),
            CoordinateSpace::Pixel => (1.0, 1.0),
        };
        let truncate = self.coordinates == CoordinateSpace::Normalized;

        self.faces
            .into_iter()
            .map(|face| {
                face.into_iter()
                    .map(|[x, y]| {
                        let (x, y) = (x * sx, y * sy);
                        if truncate {
                            LandmarkPoint::new(x.trunc(), y.trunc())
                        } else {
                            LandmarkPoint::new(x, y)
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

/// Landmark provider backed by sidecar JSON files.
#[derive(Debug, Clone, Default)]
pub struct SidecarLandmarkProvider {
    dir: Option<PathBuf>,
}

impl SidecarLandmarkProvider {
    /// Looks for `<image>.landmarks.json` next to each image.
    #[must_use]
    pub const fn new() -> Self {
        Self { dir: None }
    }

    /// Looks for `<dir>/<file name>.landmarks.json`.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Returns the sidecar path for an image.
    #[must_use]
    pub fn sidecar_path(&self, image_path: &Path) -> PathBuf {
        let name = image_path.file_name().map_or_else(
            || SIDECAR_SUFFIX.trim_start_matches('.').to_string(),
            |n| format!("{}{SIDECAR_SUFFIX}", n.to_string_lossy()),
        );
        match &self.dir {
            Some(dir) => dir.join(name),
            None => image_path.with_file_name(name),
        }
    }
}

impl LandmarkProvider for SidecarLandmarkProvider {
    fn detect(&self, image: &ImageInfo) -> Result<Vec<LandmarkSet>, DetectionError> {
        let path = self.sidecar_path(Path::new(&image.path));
        debug!("Reading landmarks from {}", path.display());

        let contents = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DetectionError::LandmarksNotFound(path.display().to_string()),
            _ => DetectionError::Malformed(format!("{}: {e}", path.display())),
        })?;

        let sidecar: SidecarFile = serde_json::from_str(&contents)
            .map_err(|e| DetectionError::Malformed(format!("{}: {e}", path.display())))?;

        Ok(sidecar.into_landmarks(image.width, image.height))
    }
}
