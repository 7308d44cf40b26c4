//! Emojify Core - Domain logic and ports
//!
//! This crate contains the domain types, the rule-based emoji selector, the
//! face compositor and the per-image orchestration that ties them to the
//! face detector and emoji asset ports.

pub mod compositor;
pub mod domain;
pub mod pipeline;
pub mod ports;
pub mod selector;

pub use compositor::{Compositor, CompositorConfig, EmojiPlacement};
pub use domain::{
    BoundingBox, DetectedFace, EmojiCategory, EmojifyOutcome, EmojifyReport, FaceOutcome,
    FaceReport, ImageDimensions, ImageInfo, Notice,
};
pub use pipeline::Emojifier;
pub use ports::{
    EmojiAssets, FaceDetector, ImageSource, LoadError, ProgressEvent, ProgressSink, ResultOutput,
};
pub use selector::{EmojiSelector, SelectorConfig};
