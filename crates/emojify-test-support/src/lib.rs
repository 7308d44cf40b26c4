//! Test support utilities for emojify.
//!
//! Provides mocks for every core port plus synthetic image and face
//! builders for testing the emojify pipeline.
//!
//! # Example
//!
//! ```
//! use emojify_test_support::{FaceBuilder, MockEmojiAssets, MockFaceDetector, SyntheticImageBuilder};
//!
//! let photo = SyntheticImageBuilder::solid(200, 100, [0, 128, 0]);
//! let face = FaceBuilder::at(10.0, 10.0, 80.0, 80.0).smiling(0.9).build();
//!
//! let detector = MockFaceDetector::with_faces(vec![face]);
//! let assets = MockEmojiAssets::solid(16, 16);
//! ```

mod builders;
mod mocks;

pub use builders::{FaceBuilder, SyntheticImageBuilder};
pub use mocks::{
    MockEmojiAssets, MockFaceDetector, MockImageSource, MockProgressSink, MockResultOutput,
};
