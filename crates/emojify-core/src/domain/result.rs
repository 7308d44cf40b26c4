//! Per-image results.

use std::fmt;

use image::{DynamicImage, GenericImageView, RgbaImage};
use serde::{Deserialize, Serialize};

use super::{BoundingBox, DetectedFace, EmojiCategory};

/// Basic image information extracted during loading.
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Path to the image file.
    pub path: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Decoded image data.
    pub image: DynamicImage,
}

impl ImageInfo {
    /// Wraps a decoded image, reading its dimensions.
    #[must_use]
    pub fn new(path: impl Into<String>, image: DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            path: path.into(),
            width,
            height,
            image,
        }
    }
}

/// Image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageDimensions {
    /// Creates a new dimensions value.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Informational states surfaced to the user. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The detector found no faces; the image is returned unchanged.
    NoFaces,
    /// No emoji image is available for a category; the face was skipped.
    NoEmoji {
        /// Category that could not be resolved.
        category: EmojiCategory,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFaces => f.write_str("no faces detected"),
            Self::NoEmoji { category } => write!(f, "no emoji available for {category}"),
        }
    }
}

/// What happened to a single face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceOutcome {
    /// The face as reported by the detector.
    pub face: DetectedFace,
    /// The selected emoji.
    pub category: EmojiCategory,
    /// Whether an emoji was drawn over the face.
    pub drawn: bool,
}

/// Result of emojifying one image.
#[derive(Debug, Clone)]
pub struct EmojifyOutcome {
    /// The composite image (an unmodified copy when no faces were found).
    pub composite: RgbaImage,
    /// Per-face outcomes, in detector order.
    pub faces: Vec<FaceOutcome>,
    /// Notices raised while processing.
    pub notices: Vec<Notice>,
}

impl EmojifyOutcome {
    /// Number of faces an emoji was drawn on.
    #[must_use]
    pub fn drawn_count(&self) -> usize {
        self.faces.iter().filter(|f| f.drawn).count()
    }

    /// Whether the detector found no faces.
    #[must_use]
    pub fn has_no_faces(&self) -> bool {
        self.notices.contains(&Notice::NoFaces)
    }
}

/// Serializable per-face summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceReport {
    /// Face box.
    pub bbox: BoundingBox,
    /// Smiling probability.
    pub smiling_probability: f32,
    /// Left eye open probability.
    pub left_eye_open_probability: f32,
    /// Right eye open probability.
    pub right_eye_open_probability: f32,
    /// Selected emoji.
    pub category: EmojiCategory,
    /// Whether the emoji was drawn.
    pub drawn: bool,
}

impl From<&FaceOutcome> for FaceReport {
    fn from(outcome: &FaceOutcome) -> Self {
        Self {
            bbox: outcome.face.bbox,
            smiling_probability: outcome.face.smiling_probability,
            left_eye_open_probability: outcome.face.left_eye_open_probability,
            right_eye_open_probability: outcome.face.right_eye_open_probability,
            category: outcome.category,
            drawn: outcome.drawn,
        }
    }
}

/// Serializable summary of one processed image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmojifyReport {
    /// Path to the source image.
    pub path: String,
    /// Path the composite was written to, if it was written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Timestamp of processing (ISO 8601).
    pub timestamp: String,
    /// Source image dimensions.
    pub dimensions: ImageDimensions,
    /// Per-face results.
    pub faces: Vec<FaceReport>,
    /// Notices raised while processing.
    pub notices: Vec<Notice>,
}

impl EmojifyReport {
    /// Builds a report from a pipeline outcome.
    #[must_use]
    pub fn new(
        image: &ImageInfo,
        outcome: &EmojifyOutcome,
        output: Option<String>,
        timestamp: String,
    ) -> Self {
        Self {
            path: image.path.clone(),
            output,
            timestamp,
            dimensions: ImageDimensions::new(image.width, image.height),
            faces: outcome.faces.iter().map(FaceReport::from).collect(),
            notices: outcome.notices.clone(),
        }
    }
}
