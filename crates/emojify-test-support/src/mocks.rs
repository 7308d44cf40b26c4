//! Mock implementations of core port traits.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use emojify_core::domain::{DetectedFace, EmojiCategory, EmojifyReport, ImageInfo};
use emojify_core::ports::{
    EmojiAssets, FaceDetector, ImageSource, LoadError, ProgressEvent, ProgressSink, ResultOutput,
};
use image::{Rgba, RgbaImage};

/// Mock implementation of `FaceDetector` for testing.
///
/// Returns preset faces, optionally per image path, and counts calls.
pub struct MockFaceDetector {
    default_faces: Vec<DetectedFace>,
    by_path: HashMap<String, Vec<DetectedFace>>,
    failure: Option<String>,
    calls: Mutex<usize>,
}

impl MockFaceDetector {
    /// Creates a detector returning `faces` for every image.
    #[must_use]
    pub fn with_faces(faces: Vec<DetectedFace>) -> Self {
        Self {
            default_faces: faces,
            by_path: HashMap::new(),
            failure: None,
            calls: Mutex::new(0),
        }
    }

    /// Creates a detector that never finds a face.
    #[must_use]
    pub fn empty() -> Self {
        Self::with_faces(vec![])
    }

    /// Creates a detector that always fails with `message`.
    #[must_use]
    pub fn failing(message: &str) -> Self {
        let mut detector = Self::empty();
        detector.failure = Some(message.to_string());
        detector
    }

    /// Returns `faces` for the image at `path` instead of the default.
    #[must_use]
    pub fn for_path(mut self, path: &str, faces: Vec<DetectedFace>) -> Self {
        self.by_path.insert(path.to_string(), faces);
        self
    }

    /// Returns the number of `detect` calls.
    #[must_use]
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FaceDetector for MockFaceDetector {
    fn detect(&self, image: &ImageInfo) -> anyhow::Result<Vec<DetectedFace>> {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner) += 1;

        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }

        Ok(self
            .by_path
            .get(&image.path)
            .unwrap_or(&self.default_faces)
            .clone())
    }
}

/// Mock implementation of `EmojiAssets` for testing.
///
/// Each category gets a distinct opaque color so draws can be identified.
pub struct MockEmojiAssets {
    images: HashMap<EmojiCategory, Arc<RgbaImage>>,
    failure: Option<String>,
    lookups: Mutex<Vec<EmojiCategory>>,
}

impl MockEmojiAssets {
    /// Creates assets of the given size for all eight categories.
    #[must_use]
    pub fn solid(width: u32, height: u32) -> Self {
        let images = EmojiCategory::ALL
            .iter()
            .map(|&category| {
                let image = RgbaImage::from_pixel(width, height, Self::color(category));
                (category, Arc::new(image))
            })
            .collect();
        Self {
            images,
            failure: None,
            lookups: Mutex::new(Vec::new()),
        }
    }

    /// Creates a store where every lookup fails with `message`.
    #[must_use]
    pub fn failing(message: &str) -> Self {
        let mut assets = Self::solid(1, 1);
        assets.failure = Some(message.to_string());
        assets
    }

    /// Removes a category from the store.
    #[must_use]
    pub fn without(mut self, category: EmojiCategory) -> Self {
        self.images.remove(&category);
        self
    }

    /// The color a category is drawn with.
    #[must_use]
    pub fn color(category: EmojiCategory) -> Rgba<u8> {
        let index = EmojiCategory::ALL
            .iter()
            .position(|c| *c == category)
            .unwrap_or_default();
        let shade = u8::try_from(index * 30 + 10).unwrap_or(u8::MAX);
        Rgba([shade, 255 - shade, 0, 255])
    }

    /// Returns the categories requested so far, in order.
    #[must_use]
    pub fn lookups(&self) -> Vec<EmojiCategory> {
        self.lookups
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl EmojiAssets for MockEmojiAssets {
    fn emoji(&self, category: EmojiCategory) -> anyhow::Result<Option<Arc<RgbaImage>>> {
        self.lookups
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(category);

        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }

        Ok(self.images.get(&category).cloned())
    }
}

/// Mock implementation of `ImageSource` for testing.
///
/// Yields pre-built images, then any load failures, and tracks iteration for
/// assertions.
pub struct MockImageSource {
    images: Vec<ImageInfo>,
    failures: Vec<(String, String)>,
    iteration_count: Arc<Mutex<usize>>,
}

impl MockImageSource {
    /// Creates a new mock source with the given images.
    #[must_use]
    pub fn new(images: Vec<ImageInfo>) -> Self {
        Self {
            images,
            failures: Vec::new(),
            iteration_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Adds an image at `path` that fails to load with `message`.
    #[must_use]
    pub fn with_failure(mut self, path: &str, message: &str) -> Self {
        self.failures.push((path.to_string(), message.to_string()));
        self
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns the number of times the source has been iterated.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ImageSource for MockImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = Result<ImageInfo, LoadError>> + Send + '_> {
        if let Ok(mut c) = self.iteration_count.lock() {
            *c += 1;
        }
        let failures = self.failures.iter().map(|(path, message)| {
            Err(LoadError::new(path.as_str(), anyhow::anyhow!("{message}")))
        });
        Box::new(self.images.iter().cloned().map(Ok).chain(failures))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.images.len() + self.failures.len())
    }
}

/// Mock implementation of `ResultOutput` for testing.
///
/// Captures reports for later assertions.
pub struct MockResultOutput {
    reports: Mutex<Vec<EmojifyReport>>,
    flush_count: Mutex<usize>,
}

impl MockResultOutput {
    /// Creates a new mock output.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            reports: Mutex::new(Vec::new()),
            flush_count: Mutex::new(0),
        }
    }

    /// Returns all captured reports.
    #[must_use]
    pub fn reports(&self) -> Vec<EmojifyReport> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockResultOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultOutput for MockResultOutput {
    fn write(&self, report: &EmojifyReport) -> anyhow::Result<()> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Notice` events.
    #[must_use]
    pub fn notice_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Notice { .. }))
            .count()
    }

    /// Returns the number of `Skipped` events.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Skipped { .. }))
            .count()
    }

    /// Returns the final counts from the `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished { processed, skipped } => Some((*processed, *skipped)),
            _ => None,
        })
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{FaceBuilder, SyntheticImageBuilder};
    use emojify_core::{Emojifier, Notice};

    #[test]
    fn test_mock_image_source_empty() {
        let source = MockImageSource::empty();
        assert_eq!(source.count_hint(), Some(0));
        assert_eq!(source.images().count(), 0);
        assert_eq!(source.iteration_count(), 1);
    }

    #[test]
    fn test_mock_image_source_failure_carries_path() {
        let source = MockImageSource::new(vec![SyntheticImageBuilder::solid(2, 2, [0; 3])])
            .with_failure("broken.png", "truncated");
        assert_eq!(source.count_hint(), Some(2));

        let failure = source.images().nth(1).unwrap().unwrap_err();
        assert_eq!(failure.path, "broken.png");
        assert_eq!(failure.to_string(), "broken.png: truncated");
    }

    #[test]
    fn test_mock_detector_per_path() {
        let face = FaceBuilder::at(0.0, 0.0, 10.0, 10.0).build();
        let detector = MockFaceDetector::empty().for_path("a.png", vec![face]);

        let a = SyntheticImageBuilder::with_path(SyntheticImageBuilder::solid(4, 4, [0; 3]), "a.png");
        let b = SyntheticImageBuilder::with_path(SyntheticImageBuilder::solid(4, 4, [0; 3]), "b.png");

        assert_eq!(detector.detect(&a).unwrap().len(), 1);
        assert!(detector.detect(&b).unwrap().is_empty());
        assert_eq!(detector.calls(), 2);
    }

    #[test]
    fn test_mock_assets_colors_are_distinct() {
        let mut colors: Vec<_> = EmojiCategory::ALL
            .iter()
            .map(|c| MockEmojiAssets::color(*c))
            .collect();
        colors.dedup();
        assert_eq!(colors.len(), 8);
    }

    #[test]
    fn test_mocks_drive_the_pipeline() {
        let face = FaceBuilder::at(10.0, 10.0, 40.0, 40.0)
            .smiling(0.9)
            .left_eye_open(0.2)
            .right_eye_open(0.2)
            .build();
        let emojifier = Emojifier::new(
            Box::new(MockFaceDetector::with_faces(vec![face])),
            Box::new(MockEmojiAssets::solid(8, 8).without(EmojiCategory::LeftWink)),
        );
        let progress = MockProgressSink::new();

        let outcome = emojifier
            .emojify_with_progress(&SyntheticImageBuilder::solid(60, 60, [0; 3]), &progress)
            .unwrap();

        assert_eq!(
            outcome.notices,
            vec![Notice::NoEmoji {
                category: EmojiCategory::LeftWink
            }]
        );
        assert_eq!(progress.notice_count(), 1);
    }

    #[test]
    fn test_mock_progress_sink() {
        let sink = MockProgressSink::new();

        sink.on_event(ProgressEvent::Skipped {
            path: "test.jpg".into(),
            reason: "broken".into(),
        });
        sink.on_event(ProgressEvent::Finished {
            processed: 1,
            skipped: 1,
        });

        assert_eq!(sink.skipped_count(), 1);
        assert_eq!(sink.finished_counts(), Some((1, 1)));
    }
}
