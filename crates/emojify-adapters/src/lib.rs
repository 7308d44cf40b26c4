//! Emojify Adapters - External adapters for emojify.
//!
//! This crate provides adapters for:
//! - Filesystem image source
//! - Face detections recorded as JSON sidecar files
//! - Emoji assets from a directory or the built-in set

pub mod assets;
pub mod builtin;
pub mod detection;
mod error;
pub mod fs;

pub use assets::{asset_path, assets_dir, list_assets, DirEmojiAssets};
pub use builtin::BuiltinEmojiAssets;
pub use detection::{
    check_face_sizes, parse_detections, SidecarFaceDetector, DEFAULT_SIDECAR_SUFFIX,
    MAX_FACE_TO_IMAGE_RATIO,
};
pub use error::AdapterError;
pub use fs::{is_emojified_output, output_path, FsImageSource, OUTPUT_SUFFIX};
