//! Face detections recorded as JSON sidecar files.
//!
//! The face classifier runs outside emojify. Its output for `photo.jpg` is
//! read from `photo.faces.json` in the same directory, either as a bare
//! array of faces or as `{ "faces": [...] }`:
//!
//! ```json
//! [
//!   {
//!     "bbox": { "x": 40.0, "y": 32.0, "width": 120.0, "height": 140.0 },
//!     "smiling_probability": 0.92,
//!     "left_eye_open_probability": 0.88,
//!     "right_eye_open_probability": 0.12
//!   }
//! ]
//! ```

use std::path::{Path, PathBuf};

use emojify_core::{DetectedFace, FaceDetector, ImageInfo};
use serde::Deserialize;
use tracing::debug;

use crate::error::AdapterError;

/// Default sidecar file suffix appended to the image stem.
pub const DEFAULT_SIDECAR_SUFFIX: &str = ".faces.json";

/// Face boxes wider or taller than this many image sizes are rejected.
pub const MAX_FACE_TO_IMAGE_RATIO: f32 = 4.0;

#[derive(Deserialize)]
#[serde(untagged)]
enum SidecarFile {
    List(Vec<DetectedFace>),
    Wrapped { faces: Vec<DetectedFace> },
}

/// Face detector reading recorded classifier output next to each image.
#[derive(Debug, Clone)]
pub struct SidecarFaceDetector {
    suffix: String,
}

impl SidecarFaceDetector {
    /// Creates a detector using the given sidecar suffix.
    #[must_use]
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Returns the sidecar path for an image.
    #[must_use]
    pub fn sidecar_path(&self, image_path: &Path) -> PathBuf {
        let stem = image_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = format!("{stem}{}", self.suffix);
        image_path
            .parent()
            .map_or_else(|| PathBuf::from(&name), |dir| dir.join(&name))
    }

    /// Reads and validates the detections for an image.
    ///
    /// # Errors
    ///
    /// Returns an error if the sidecar is missing, unreadable, malformed or
    /// holds a probability outside `0.0..=1.0`.
    pub fn load(&self, image_path: &Path) -> Result<Vec<DetectedFace>, AdapterError> {
        let path = self.sidecar_path(image_path);
        if !path.is_file() {
            return Err(AdapterError::MissingDetections { path });
        }

        debug!("Reading face detections from {}", path.display());
        let content = std::fs::read_to_string(&path).map_err(|source| AdapterError::Io {
            path: path.clone(),
            source,
        })?;

        parse_detections(&content, &path)
    }
}

impl Default for SidecarFaceDetector {
    fn default() -> Self {
        Self::new(DEFAULT_SIDECAR_SUFFIX)
    }
}

impl FaceDetector for SidecarFaceDetector {
    fn detect(&self, image: &ImageInfo) -> anyhow::Result<Vec<DetectedFace>> {
        let image_path = Path::new(&image.path);
        let faces = self.load(image_path)?;
        check_face_sizes(
            &faces,
            image.width,
            image.height,
            &self.sidecar_path(image_path),
        )?;
        Ok(faces)
    }
}

/// Rejects faces far larger than the image they were detected in.
///
/// Boxes may extend past the frame, but not by more than
/// [`MAX_FACE_TO_IMAGE_RATIO`] times the image size.
///
/// # Errors
///
/// Returns [`AdapterError::OversizedFace`] for the first offending face.
#[allow(clippy::cast_precision_loss)]
pub fn check_face_sizes(
    faces: &[DetectedFace],
    image_width: u32,
    image_height: u32,
    path: &Path,
) -> Result<(), AdapterError> {
    let max_width = image_width as f32 * MAX_FACE_TO_IMAGE_RATIO;
    let max_height = image_height as f32 * MAX_FACE_TO_IMAGE_RATIO;

    match faces
        .iter()
        .position(|f| f.bbox.width > max_width || f.bbox.height > max_height)
    {
        Some(index) => Err(AdapterError::OversizedFace {
            path: path.to_path_buf(),
            index,
            width: faces[index].bbox.width,
            height: faces[index].bbox.height,
            image_width,
            image_height,
        }),
        None => Ok(()),
    }
}

/// Parses sidecar JSON. `path` is only used for error messages.
///
/// # Errors
///
/// Returns an error if the JSON does not describe faces, a face box is not
/// finite or has a negative size, or a probability is outside `0.0..=1.0`.
pub fn parse_detections(content: &str, path: &Path) -> Result<Vec<DetectedFace>, AdapterError> {
    let file: SidecarFile =
        serde_json::from_str(content).map_err(|source| AdapterError::InvalidDetections {
            path: path.to_path_buf(),
            source,
        })?;

    let faces = match file {
        SidecarFile::List(faces) | SidecarFile::Wrapped { faces } => faces,
    };

    for (index, face) in faces.iter().enumerate() {
        if let Some(reason) = face.bbox.invalid_reason() {
            return Err(AdapterError::InvalidBoundingBox {
                path: path.to_path_buf(),
                index,
                reason,
            });
        }
        if let Some((field, value)) = face.invalid_probability() {
            return Err(AdapterError::InvalidProbability {
                path: path.to_path_buf(),
                index,
                field,
                value,
            });
        }
    }

    Ok(faces)
}
