//! Emoji assets loaded from a directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Result;
use emojify_core::{EmojiAssets, EmojiCategory};
use image::RgbaImage;
use tracing::{debug, warn};

use crate::error::AdapterError;

/// Returns the default asset directory.
///
/// Uses `XDG_DATA_HOME/emojify/assets` or `~/.local/share/emojify/assets`.
#[must_use]
pub fn assets_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("emojify")
        .join("assets")
}

/// Returns the file an emoji category is loaded from.
#[must_use]
pub fn asset_path(dir: &Path, category: EmojiCategory) -> PathBuf {
    dir.join(format!("{}.png", category.asset_name()))
}

/// Lists every category with its asset file and whether that file exists.
#[must_use]
pub fn list_assets(dir: &Path) -> Vec<(EmojiCategory, PathBuf, bool)> {
    EmojiCategory::ALL
        .iter()
        .map(|&category| {
            let path = asset_path(dir, category);
            let exists = path.is_file();
            (category, path, exists)
        })
        .collect()
}

/// Emoji assets stored as `<dir>/<asset name>.png`.
///
/// Images are decoded on first use and cached.
pub struct DirEmojiAssets {
    dir: PathBuf,
    cache: Mutex<HashMap<EmojiCategory, Arc<RgbaImage>>>,
}

impl DirEmojiAssets {
    /// Creates an asset store reading from `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the directory assets are read from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether at least one asset file exists in the directory.
    #[must_use]
    pub fn has_any(&self) -> bool {
        list_assets(&self.dir).iter().any(|(_, _, exists)| *exists)
    }

    fn load(&self, category: EmojiCategory) -> Result<Option<RgbaImage>, AdapterError> {
        let path = asset_path(&self.dir, category);
        if !path.is_file() {
            warn!("Emoji asset missing: {}", path.display());
            return Ok(None);
        }

        debug!("Loading emoji asset {}", path.display());
        let image = image::open(&path).map_err(|source| AdapterError::AssetDecode {
            path: path.clone(),
            source,
        })?;
        Ok(Some(image.to_rgba8()))
    }
}

impl EmojiAssets for DirEmojiAssets {
    fn emoji(&self, category: EmojiCategory) -> Result<Option<Arc<RgbaImage>>> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(image) = cache.get(&category) {
            return Ok(Some(Arc::clone(image)));
        }

        let Some(image) = self.load(category)? else {
            return Ok(None);
        };
        let image = Arc::new(image);
        cache.insert(category, Arc::clone(&image));
        Ok(Some(image))
    }
}
