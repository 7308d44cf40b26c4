//! Integration tests for the per-image emojify pipeline.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use emojify_core::{
    BoundingBox, Compositor, DetectedFace, EmojiCategory, Emojifier, ImageInfo, Notice,
    ProgressEvent,
};
use emojify_test_support::{
    FaceBuilder, MockEmojiAssets, MockFaceDetector, MockProgressSink, SyntheticImageBuilder,
};
use image::Rgba;

const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);

/// A 40×40 face at `x`; its 8×8 emoji lands on `x+2..x+38`, rows `20..52`.
fn face(x: f32, smiling: f32, left: f32, right: f32) -> DetectedFace {
    FaceBuilder::at(x, 10.0, 40.0, 40.0)
        .smiling(smiling)
        .left_eye_open(left)
        .right_eye_open(right)
        .build()
}

fn image() -> ImageInfo {
    SyntheticImageBuilder::with_path(SyntheticImageBuilder::solid(120, 60, [0, 255, 0]), "test.png")
}

fn emojifier(faces: Vec<DetectedFace>, assets: &Arc<MockEmojiAssets>) -> Emojifier {
    Emojifier::new(
        Box::new(MockFaceDetector::with_faces(faces)),
        Box::new(Arc::clone(assets)),
    )
}

#[test]
fn test_no_faces_returns_unmodified_image() {
    let assets = Arc::new(MockEmojiAssets::solid(8, 8));
    let input = image();

    let outcome = emojifier(vec![], &assets).emojify(&input).unwrap();

    assert!(outcome.has_no_faces());
    assert!(outcome.faces.is_empty());
    assert_eq!(outcome.notices, vec![Notice::NoFaces]);
    assert_eq!(outcome.composite, input.image.to_rgba8());
    assert!(assets.lookups().is_empty());
}

#[test]
fn test_every_face_gets_an_emoji() {
    let assets = Arc::new(MockEmojiAssets::solid(8, 8));
    let faces = vec![face(0.0, 0.9, 0.9, 0.1), face(60.0, 0.05, 0.1, 0.9)];

    let outcome = emojifier(faces, &assets).emojify(&image()).unwrap();

    assert_eq!(outcome.faces.len(), 2);
    assert_eq!(outcome.faces[0].category, EmojiCategory::Smile);
    assert_eq!(outcome.faces[1].category, EmojiCategory::ClosedEyeFrown);
    assert_eq!(outcome.drawn_count(), 2);
    assert!(outcome.notices.is_empty());
    assert_eq!(
        assets.lookups(),
        vec![EmojiCategory::Smile, EmojiCategory::ClosedEyeFrown]
    );

    assert_eq!(
        *outcome.composite.get_pixel(20, 30),
        MockEmojiAssets::color(EmojiCategory::Smile)
    );
    assert_eq!(
        *outcome.composite.get_pixel(80, 30),
        MockEmojiAssets::color(EmojiCategory::ClosedEyeFrown)
    );
    // Background between faces untouched.
    assert_eq!(*outcome.composite.get_pixel(50, 30), GREEN);
}

#[test]
fn test_missing_asset_raises_notice_and_skips_face() {
    let assets = Arc::new(MockEmojiAssets::solid(8, 8).without(EmojiCategory::Smile));
    let faces = vec![face(0.0, 0.9, 0.9, 0.1), face(60.0, 0.05, 0.1, 0.9)];

    let outcome = emojifier(faces, &assets).emojify(&image()).unwrap();

    assert_eq!(
        outcome.notices,
        vec![Notice::NoEmoji {
            category: EmojiCategory::Smile
        }]
    );
    assert!(!outcome.faces[0].drawn);
    assert!(outcome.faces[1].drawn);
    assert_eq!(*outcome.composite.get_pixel(20, 30), GREEN);
}

#[test]
fn test_missing_asset_notice_is_raised_once_per_category() {
    let assets = Arc::new(MockEmojiAssets::solid(8, 8).without(EmojiCategory::Smile));
    let faces = vec![face(0.0, 0.9, 0.9, 0.1), face(60.0, 0.9, 0.9, 0.1)];

    let outcome = emojifier(faces, &assets).emojify(&image()).unwrap();

    assert_eq!(outcome.notices.len(), 1);
    assert_eq!(outcome.drawn_count(), 0);
    assert_eq!(
        assets.lookups(),
        vec![EmojiCategory::Smile, EmojiCategory::Smile]
    );
}

#[test]
fn test_detector_error_propagates() {
    let emojifier = Emojifier::new(
        Box::new(MockFaceDetector::failing("classifier unavailable")),
        Box::new(MockEmojiAssets::solid(8, 8)),
    );
    let err = emojifier.emojify(&image()).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("Face detection failed for test.png"));
    assert!(message.contains("classifier unavailable"));
}

#[test]
fn test_asset_error_propagates() {
    let emojifier = Emojifier::new(
        Box::new(MockFaceDetector::with_faces(vec![face(0.0, 0.9, 0.9, 0.1)])),
        Box::new(MockEmojiAssets::failing("corrupt asset")),
    );
    let err = emojifier.emojify(&image()).unwrap_err();
    assert!(format!("{err:#}").contains("corrupt asset"));
}

#[test]
fn test_detector_runs_once_per_image() {
    let detector = Arc::new(MockFaceDetector::with_faces(vec![face(0.0, 0.9, 0.9, 0.1)]));
    let emojifier = Emojifier::new(
        Box::new(Arc::clone(&detector)),
        Box::new(MockEmojiAssets::solid(8, 8)),
    );

    emojifier.emojify(&image()).unwrap();

    assert_eq!(detector.calls(), 1);
}

#[test]
fn test_emojify_is_idempotent() {
    let assets = Arc::new(MockEmojiAssets::solid(8, 8));
    let emojifier = emojifier(
        vec![face(0.0, 0.9, 0.1, 0.1), face(50.0, 0.3, 0.9, 0.9)],
        &assets,
    );
    let input = SyntheticImageBuilder::horizontal_gradient(120, 60);

    let first = emojifier.emojify(&input).unwrap();
    let second = emojifier.emojify(&input).unwrap();

    assert_eq!(first.composite.as_raw(), second.composite.as_raw());
    assert_ne!(first.composite, input.image.to_rgba8());
}

#[test]
fn test_face_far_outside_the_image_is_not_drawn() {
    let assets = Arc::new(MockEmojiAssets::solid(8, 8));
    let faces = vec![
        FaceBuilder::at(0.0, 0.0, 1_000_000.0, 100.0).smiling(0.9).build(),
        face(500.0, 0.9, 0.9, 0.1),
    ];
    let input = image();

    let outcome = emojifier(faces, &assets).emojify(&input).unwrap();

    assert_eq!(outcome.faces.len(), 2);
    assert_eq!(outcome.drawn_count(), 0);
    assert!(outcome.notices.is_empty());
    assert_eq!(outcome.composite, input.image.to_rgba8());
}

#[test]
fn test_transparent_emoji_leaves_photo_untouched() {
    let background = SyntheticImageBuilder::horizontal_gradient(60, 60).image.to_rgba8();
    let face = BoundingBox::new(10.0, 10.0, 40.0, 40.0);
    let compositor = Compositor::default();

    let clear = compositor.composite(
        &background,
        &SyntheticImageBuilder::emoji(8, 8, [255, 0, 0, 0]),
        &face,
    );
    assert_eq!(clear, background);

    let opaque = compositor.composite(
        &background,
        &SyntheticImageBuilder::emoji(8, 8, [255, 0, 0, 255]),
        &face,
    );
    assert_eq!(*opaque.get_pixel(30, 30), Rgba([255, 0, 0, 255]));
    assert_eq!(*opaque.get_pixel(5, 5), *background.get_pixel(5, 5));
}

#[test]
fn test_notices_are_forwarded_to_progress() {
    let assets = Arc::new(MockEmojiAssets::solid(8, 8));
    let progress = MockProgressSink::new();

    emojifier(vec![], &assets)
        .emojify_with_progress(&image(), &progress)
        .unwrap();

    let events = progress.events();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        ProgressEvent::Notice {
            path,
            notice: Notice::NoFaces,
        } if path == "test.png"
    ));
}
