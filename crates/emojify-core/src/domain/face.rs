//! Face geometry and classifier output.

use serde::{Deserialize, Serialize};

/// Axis-aligned face box in image pixel coordinates.
///
/// `x` and `y` locate the top-left corner and may be negative when a face is
/// cut off by the image border.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge in pixels.
    pub x: f32,
    /// Top edge in pixels.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl BoundingBox {
    /// Creates a bounding box from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Horizontal center of the box.
    #[must_use]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Vertical center of the box.
    #[must_use]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Describes why the box is unusable, if it is.
    ///
    /// Every coordinate must be finite and the size must not be negative.
    #[must_use]
    pub fn invalid_reason(&self) -> Option<&'static str> {
        if ![self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
        {
            Some("coordinates must be finite")
        } else if self.width < 0.0 || self.height < 0.0 {
            Some("width and height must not be negative")
        } else {
            None
        }
    }
}

/// A face reported by the external classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectedFace {
    /// Face box.
    pub bbox: BoundingBox,
    /// Probability that the face is smiling (0.0 to 1.0).
    pub smiling_probability: f32,
    /// Probability that the left eye is open (0.0 to 1.0).
    pub left_eye_open_probability: f32,
    /// Probability that the right eye is open (0.0 to 1.0).
    pub right_eye_open_probability: f32,
}

impl DetectedFace {
    /// Returns the first probability that is NaN or outside `0.0..=1.0`,
    /// named by its field.
    #[must_use]
    pub fn invalid_probability(&self) -> Option<(&'static str, f32)> {
        [
            ("smiling_probability", self.smiling_probability),
            ("left_eye_open_probability", self.left_eye_open_probability),
            ("right_eye_open_probability", self.right_eye_open_probability),
        ]
        .into_iter()
        .find(|(_, p)| !(0.0..=1.0).contains(p))
    }
}
