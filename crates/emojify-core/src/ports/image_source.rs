//! Image source port for loading images from various sources.

use std::fmt;

use crate::domain::ImageInfo;

/// An image the source found but could not load.
#[derive(Debug)]
pub struct LoadError {
    /// Path of the image that failed.
    pub path: String,
    /// Underlying decode or I/O error.
    pub error: anyhow::Error,
}

impl LoadError {
    /// Wraps `error` for the image at `path`.
    pub fn new(path: impl Into<String>, error: anyhow::Error) -> Self {
        Self {
            path: path.into(),
            error,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:#}", self.path, self.error)
    }
}

impl std::error::Error for LoadError {}

/// Port for loading images from a source.
pub trait ImageSource: Send + Sync {
    /// Returns an iterator over images from this source.
    ///
    /// # Errors
    ///
    /// Individual items are [`LoadError`]s, carrying the image path, if an
    /// image fails to load.
    fn images(&self) -> Box<dyn Iterator<Item = Result<ImageInfo, LoadError>> + Send + '_>;

    /// Returns the total number of images, if known.
    fn count_hint(&self) -> Option<usize>;
}
