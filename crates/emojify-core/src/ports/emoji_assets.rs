//! Emoji asset port.

use std::sync::Arc;

use image::RgbaImage;

use crate::domain::EmojiCategory;

/// Store resolving an emoji category to its image.
pub trait EmojiAssets: Send + Sync {
    /// Returns the emoji image for a category, or `None` when the store has
    /// no image for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the asset exists but cannot be read or decoded.
    fn emoji(&self, category: EmojiCategory) -> anyhow::Result<Option<Arc<RgbaImage>>>;
}

impl<T: EmojiAssets + ?Sized> EmojiAssets for Arc<T> {
    fn emoji(&self, category: EmojiCategory) -> anyhow::Result<Option<Arc<RgbaImage>>> {
        (**self).emoji(category)
    }
}
