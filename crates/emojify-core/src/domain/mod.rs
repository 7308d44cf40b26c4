//! Core domain types for emojify.

mod emoji;
mod face;
mod result;

pub use emoji::EmojiCategory;
pub use face::{BoundingBox, DetectedFace};
pub use result::{
    EmojifyOutcome, EmojifyReport, FaceOutcome, FaceReport, ImageDimensions, ImageInfo, Notice,
};
