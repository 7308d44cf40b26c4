//! Synthetic image and face builders for testing.

use emojify_core::{BoundingBox, DetectedFace, ImageInfo};
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

/// Builder for creating synthetic test images.
pub struct SyntheticImageBuilder;

impl SyntheticImageBuilder {
    /// Creates a single-color RGB photo.
    #[must_use]
    pub fn solid(width: u32, height: u32, color: [u8; 3]) -> ImageInfo {
        let img = RgbImage::from_pixel(width, height, Rgb(color));
        ImageInfo::new("synthetic://solid", DynamicImage::ImageRgb8(img))
    }

    /// Creates a horizontal gradient so placement shifts are visible.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn horizontal_gradient(width: u32, height: u32) -> ImageInfo {
        let img = RgbImage::from_fn(width, height, |x, _| {
            let val = ((u32::from(u8::MAX) * x) / width.max(1)) as u8;
            Rgb([val, val, val])
        });
        ImageInfo::new(
            "synthetic://horizontal_gradient",
            DynamicImage::ImageRgb8(img),
        )
    }

    /// Creates an opaque single-color emoji image.
    #[must_use]
    pub fn emoji(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }

    /// Renames a synthetic image.
    #[must_use]
    pub fn with_path(mut info: ImageInfo, path: &str) -> ImageInfo {
        path.clone_into(&mut info.path);
        info
    }
}

/// Builder for classifier output.
///
/// Defaults describe a neutral face: not smiling, both eyes open under the
/// default thresholds (left eye open probability 0.9, right 0.1).
#[derive(Debug, Clone, Copy)]
pub struct FaceBuilder {
    face: DetectedFace,
}

impl FaceBuilder {
    /// Starts a face at the given box.
    #[must_use]
    pub const fn at(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            face: DetectedFace {
                bbox: BoundingBox::new(x, y, width, height),
                smiling_probability: 0.0,
                left_eye_open_probability: 0.9,
                right_eye_open_probability: 0.1,
            },
        }
    }

    /// Sets the smiling probability.
    #[must_use]
    pub const fn smiling(mut self, probability: f32) -> Self {
        self.face.smiling_probability = probability;
        self
    }

    /// Sets the left eye open probability.
    #[must_use]
    pub const fn left_eye_open(mut self, probability: f32) -> Self {
        self.face.left_eye_open_probability = probability;
        self
    }

    /// Sets the right eye open probability.
    #[must_use]
    pub const fn right_eye_open(mut self, probability: f32) -> Self {
        self.face.right_eye_open_probability = probability;
        self
    }

    /// Finishes the face.
    #[must_use]
    pub const fn build(self) -> DetectedFace {
        self.face
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_dimensions() {
        let info = SyntheticImageBuilder::solid(30, 20, [1, 2, 3]);
        assert_eq!((info.width, info.height), (30, 20));
    }

    #[test]
    fn test_with_path() {
        let info = SyntheticImageBuilder::with_path(
            SyntheticImageBuilder::solid(2, 2, [0, 0, 0]),
            "party.png",
        );
        assert_eq!(info.path, "party.png");
    }

    #[test]
    fn test_face_builder_defaults_to_frown() {
        let face = FaceBuilder::at(1.0, 2.0, 3.0, 4.0).build();
        let category = emojify_core::EmojiSelector::default().select(&face);
        assert_eq!(category, emojify_core::EmojiCategory::Frown);
    }
}
