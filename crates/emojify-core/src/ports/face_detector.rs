//! Face detection port.

use std::sync::Arc;

use crate::domain::{DetectedFace, ImageInfo};

/// Pluggable face classifier.
///
/// Implementations return every face found in the image together with its
/// smiling and eye-open probabilities. Order carries no meaning and no
/// tracking identity is expected between calls.
pub trait FaceDetector: Send + Sync {
    /// Detects faces in an image.
    ///
    /// # Errors
    ///
    /// Returns an error if the classifier cannot process the image.
    fn detect(&self, image: &ImageInfo) -> anyhow::Result<Vec<DetectedFace>>;
}

impl<T: FaceDetector + ?Sized> FaceDetector for Arc<T> {
    fn detect(&self, image: &ImageInfo) -> anyhow::Result<Vec<DetectedFace>> {
        (**self).detect(image)
    }
}
