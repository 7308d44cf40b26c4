//! Per-image orchestration.
//!
//! Runs the face detector, selects an emoji for every face, resolves it
//! through the asset store and composites all of them onto one image.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::compositor::Compositor;
use crate::domain::{EmojifyOutcome, FaceOutcome, ImageInfo, Notice};
use crate::ports::{EmojiAssets, FaceDetector, ProgressEvent, ProgressSink};
use crate::selector::EmojiSelector;

/// Detects faces in images and overlays a matching emoji on each.
pub struct Emojifier {
    detector: Box<dyn FaceDetector>,
    assets: Box<dyn EmojiAssets>,
    selector: EmojiSelector,
    compositor: Compositor,
}

impl Emojifier {
    /// Creates an emojifier with default selection thresholds and scale.
    #[must_use]
    pub fn new(detector: Box<dyn FaceDetector>, assets: Box<dyn EmojiAssets>) -> Self {
        Self {
            detector,
            assets,
            selector: EmojiSelector::default(),
            compositor: Compositor::default(),
        }
    }

    /// Replaces the emoji selector.
    #[must_use]
    pub const fn with_selector(mut self, selector: EmojiSelector) -> Self {
        self.selector = selector;
        self
    }

    /// Replaces the compositor.
    #[must_use]
    pub const fn with_compositor(mut self, compositor: Compositor) -> Self {
        self.compositor = compositor;
        self
    }

    /// Returns the selector in use.
    #[must_use]
    pub const fn selector(&self) -> &EmojiSelector {
        &self.selector
    }

    /// Emojifies one image.
    ///
    /// # Errors
    ///
    /// Returns an error if face detection fails or an emoji asset cannot be
    /// loaded. Finding no faces is not an error.
    pub fn emojify(&self, image: &ImageInfo) -> Result<EmojifyOutcome> {
        let faces = self
            .detector
            .detect(image)
            .with_context(|| format!("Face detection failed for {}", image.path))?;

        debug!("{}: number of faces = {}", image.path, faces.len());

        let mut composite = image.image.to_rgba8();

        if faces.is_empty() {
            info!("{}: no faces detected", image.path);
            return Ok(EmojifyOutcome {
                composite,
                faces: vec![],
                notices: vec![Notice::NoFaces],
            });
        }

        let mut outcomes = Vec::with_capacity(faces.len());
        let mut notices = Vec::new();

        for face in faces {
            let category = self.selector.select(&face);

            let emoji = self
                .assets
                .emoji(category)
                .with_context(|| format!("Failed to load emoji for {category}"))?;

            let drawn = match emoji {
                Some(emoji) => self
                    .compositor
                    .draw(&mut composite, &emoji, &face.bbox)
                    .is_some(),
                None => {
                    info!("{}: no emoji available for {category}", image.path);
                    let notice = Notice::NoEmoji { category };
                    if !notices.contains(&notice) {
                        notices.push(notice);
                    }
                    false
                }
            };

            outcomes.push(FaceOutcome {
                face,
                category,
                drawn,
            });
        }

        Ok(EmojifyOutcome {
            composite,
            faces: outcomes,
            notices,
        })
    }

    /// Emojifies one image and forwards its notices to `progress`.
    ///
    /// # Errors
    ///
    /// See [`Emojifier::emojify`].
    pub fn emojify_with_progress(
        &self,
        image: &ImageInfo,
        progress: &dyn ProgressSink,
    ) -> Result<EmojifyOutcome> {
        let outcome = self.emojify(image)?;
        for notice in &outcome.notices {
            progress.on_event(ProgressEvent::Notice {
                path: image.path.clone(),
                notice: *notice,
            });
        }
        Ok(outcome)
    }
}

