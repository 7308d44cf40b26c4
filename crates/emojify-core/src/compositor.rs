//! Emoji compositing.
//!
//! Scales an emoji to the width of a face box, keeping its aspect ratio, and
//! draws it over the face slightly above center so it covers eyes and mouth.

// Pixel geometry converts between float boxes and integer rasters.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

use image::imageops::{self, FilterType};
use image::RgbaImage;
use tracing::{debug, warn};

use crate::domain::BoundingBox;

/// Configuration for emoji compositing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositorConfig {
    /// Emoji width as a fraction of the face width; also applied to the height.
    pub scale_factor: f32,
}

impl CompositorConfig {
    /// Default scale factor.
    pub const DEFAULT_SCALE_FACTOR: f32 = 0.9;
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            scale_factor: Self::DEFAULT_SCALE_FACTOR,
        }
    }
}

/// Size and position of a scaled emoji on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmojiPlacement {
    /// Scaled emoji width.
    pub width: u32,
    /// Scaled emoji height.
    pub height: u32,
    /// Left edge on the canvas (may be negative).
    pub x: i64,
    /// Top edge on the canvas (may be negative).
    pub y: i64,
}

impl EmojiPlacement {
    /// Computes where an emoji of the given source size goes on a face.
    ///
    /// The height is derived with integer arithmetic from the scaled width
    /// and then scaled again, so a 200×100 emoji on a 100 px wide face at
    /// 0.9 becomes 90×40. The emoji is centered horizontally on the face and
    /// its vertical center sits a third of its height above the face center.
    ///
    /// Returns `None` when the scaled emoji would be empty.
    #[must_use]
    pub fn compute(
        face: &BoundingBox,
        emoji_width: u32,
        emoji_height: u32,
        scale_factor: f32,
    ) -> Option<Self> {
        if emoji_width == 0 {
            return None;
        }

        let width = (face.width * scale_factor) as u32;
        let aspect_height = u64::from(emoji_height) * u64::from(width) / u64::from(emoji_width);
        let height = (aspect_height as f32 * scale_factor) as u32;

        if width == 0 || height == 0 {
            return None;
        }

        let x = (face.center_x() - (width / 2) as f32).floor() as i64;
        let y = (face.center_y() - (height / 3) as f32).floor() as i64;

        Some(Self {
            width,
            height,
            x,
            y,
        })
    }

    /// Whether any pixel of the placement lands on a canvas of this size.
    #[must_use]
    pub fn overlaps(&self, canvas_width: u32, canvas_height: u32) -> bool {
        self.x < i64::from(canvas_width)
            && self.y < i64::from(canvas_height)
            && self.x + i64::from(self.width) > 0
            && self.y + i64::from(self.height) > 0
    }

    /// Whether the placement exceeds [`MAX_CANVAS_MULTIPLE`] canvas sizes.
    #[must_use]
    pub fn is_oversized(&self, canvas_width: u32, canvas_height: u32) -> bool {
        let limit = u64::from(MAX_CANVAS_MULTIPLE);
        u64::from(self.width) > u64::from(canvas_width) * limit
            || u64::from(self.height) > u64::from(canvas_height) * limit
    }
}

/// Scaled emoji wider or taller than this many canvas sizes are not drawn.
pub const MAX_CANVAS_MULTIPLE: u32 = 4;

/// Draws emoji images over face boxes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compositor {
    config: CompositorConfig,
}

impl Compositor {
    /// Creates a compositor with the given configuration.
    #[must_use]
    pub const fn new(config: CompositorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    #[must_use]
    pub const fn config(&self) -> &CompositorConfig {
        &self.config
    }

    /// Returns a copy of `background` with `emoji` drawn over `face`.
    ///
    /// Neither input is modified.
    #[must_use]
    pub fn composite(
        &self,
        background: &RgbaImage,
        emoji: &RgbaImage,
        face: &BoundingBox,
    ) -> RgbaImage {
        let mut canvas = background.clone();
        self.draw(&mut canvas, emoji, face);
        canvas
    }

    /// Draws `emoji` over `face` directly onto `canvas`.
    ///
    /// Pixels outside the canvas are clipped. Nothing is drawn when the
    /// placement misses the canvas entirely or is oversized (see
    /// [`MAX_CANVAS_MULTIPLE`]). Returns the placement used, or `None` if
    /// nothing was drawn.
    pub fn draw(
        &self,
        canvas: &mut RgbaImage,
        emoji: &RgbaImage,
        face: &BoundingBox,
    ) -> Option<EmojiPlacement> {
        let Some(placement) = EmojiPlacement::compute(
            face,
            emoji.width(),
            emoji.height(),
            self.config.scale_factor,
        ) else {
            debug!(?face, "Emoji scales to nothing, skipping draw");
            return None;
        };

        let (canvas_width, canvas_height) = canvas.dimensions();
        if !placement.overlaps(canvas_width, canvas_height) {
            debug!(?placement, "Emoji lies outside the canvas, skipping draw");
            return None;
        }
        if placement.is_oversized(canvas_width, canvas_height) {
            warn!(
                ?placement,
                canvas_width, canvas_height, "Emoji far larger than the canvas, skipping draw"
            );
            return None;
        }

        debug!(?placement, "Drawing emoji");

        let scaled = imageops::resize(emoji, placement.width, placement.height, FilterType::Nearest);
        imageops::overlay(canvas, &scaled, placement.x, placement.y);

        Some(placement)
    }
}
