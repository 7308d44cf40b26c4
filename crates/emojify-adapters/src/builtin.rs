//! Built-in emoji set.
//!
//! Eight flat 128×128 faces drawn in code, so emojify works without an asset
//! directory. Eyes are placed as seen in a photo: the subject's left eye is
//! on the image's right.

#![allow(clippy::cast_precision_loss)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use emojify_core::{EmojiAssets, EmojiCategory};
use image::{Rgba, RgbaImage};
use tracing::{debug, info};

use crate::assets::asset_path;

/// Side length of the built-in emoji images.
pub const BUILTIN_SIZE: u32 = 128;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
const FILL: Rgba<u8> = Rgba([255, 204, 77, 255]);
const OUTLINE: Rgba<u8> = Rgba([184, 120, 20, 255]);
const FEATURE: Rgba<u8> = Rgba([66, 40, 14, 255]);

const CENTER: f32 = 63.5;
const RADIUS: f32 = 60.0;
const OUTLINE_WIDTH: f32 = 4.0;
const EYE_Y: f32 = 50.0;
/// Subject's right eye, drawn on the image's left.
const RIGHT_EYE_X: f32 = 44.0;
/// Subject's left eye, drawn on the image's right.
const LEFT_EYE_X: f32 = 84.0;
const EYE_RADIUS: f32 = 8.0;

/// Emoji assets drawn in code.
pub struct BuiltinEmojiAssets {
    images: HashMap<EmojiCategory, Arc<RgbaImage>>,
}

impl BuiltinEmojiAssets {
    /// Renders all eight emoji.
    #[must_use]
    pub fn new() -> Self {
        let images = EmojiCategory::ALL
            .iter()
            .map(|&category| (category, Arc::new(render(category))))
            .collect();
        Self { images }
    }

    /// Writes the built-in set as PNG files into `dir`.
    ///
    /// Existing files are kept unless `overwrite` is set. Returns the paths
    /// that were written.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or a file cannot
    /// be written.
    pub fn write_to(&self, dir: &Path, overwrite: bool) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create asset directory {}", dir.display()))?;

        let mut written = Vec::new();
        for category in EmojiCategory::ALL {
            let path = asset_path(dir, category);
            if path.exists() && !overwrite {
                debug!("Keeping existing asset {}", path.display());
                continue;
            }
            self.images[&category]
                .save(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}

impl Default for BuiltinEmojiAssets {
    fn default() -> Self {
        Self::new()
    }
}

impl EmojiAssets for BuiltinEmojiAssets {
    fn emoji(&self, category: EmojiCategory) -> Result<Option<Arc<RgbaImage>>> {
        Ok(self.images.get(&category).cloned())
    }
}

/// Draws one emoji.
#[must_use]
pub fn render(category: EmojiCategory) -> RgbaImage {
    let smiling = category.is_smiling();
    let left_closed = category.left_eye_closed();
    let right_closed = category.right_eye_closed();

    RgbaImage::from_fn(BUILTIN_SIZE, BUILTIN_SIZE, |x, y| {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
        let dist = distance(px, py, CENTER, CENTER);

        if dist > RADIUS {
            TRANSPARENT
        } else if dist > RADIUS - OUTLINE_WIDTH {
            OUTLINE
        } else if is_eye(px, py, RIGHT_EYE_X, right_closed)
            || is_eye(px, py, LEFT_EYE_X, left_closed)
            || is_mouth(px, py, smiling)
        {
            FEATURE
        } else {
            FILL
        }
    })
}

fn distance(x: f32, y: f32, cx: f32, cy: f32) -> f32 {
    (x - cx).hypot(y - cy)
}

fn is_eye(x: f32, y: f32, eye_x: f32, closed: bool) -> bool {
    if closed {
        (x - eye_x).abs() <= EYE_RADIUS + 2.0 && (y - EYE_Y).abs() <= 2.0
    } else {
        distance(x, y, eye_x, EYE_Y) <= EYE_RADIUS
    }
}

fn is_mouth(x: f32, y: f32, smiling: bool) -> bool {
    if smiling {
        // Lower arc of a ring around the face center.
        let d = distance(x, y, CENTER, CENTER);
        (34.0..=40.0).contains(&d) && y > 82.0
    } else {
        // Upper arc of a ring centered below the face.
        let d = distance(x, y, CENTER, 122.0);
        (28.0..=34.0).contains(&d) && y < 100.0
    }
}
