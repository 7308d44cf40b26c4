use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the emojify adapters.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("no face detections found at {}", path.display())]
    MissingDetections { path: PathBuf },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid face detections in {}", path.display())]
    InvalidDetections {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("face {index} in {}: {field} = {value} is not in 0.0..=1.0", path.display())]
    InvalidProbability {
        path: PathBuf,
        index: usize,
        field: &'static str,
        value: f32,
    },

    #[error("face {index} in {}: {reason}", path.display())]
    InvalidBoundingBox {
        path: PathBuf,
        index: usize,
        reason: &'static str,
    },

    #[error(
        "face {index} in {}: {width}x{height} box is far larger than the {image_width}x{image_height} image",
        path.display()
    )]
    OversizedFace {
        path: PathBuf,
        index: usize,
        width: f32,
        height: f32,
        image_width: u32,
        image_height: u32,
    },

    #[error("failed to decode emoji asset {}", path.display())]
    AssetDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
