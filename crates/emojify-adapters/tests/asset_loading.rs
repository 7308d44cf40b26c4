//! Integration tests for emoji asset stores.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use emojify_adapters::{asset_path, list_assets, BuiltinEmojiAssets, DirEmojiAssets};
use emojify_core::{EmojiAssets, EmojiCategory};

#[test]
fn test_builtin_set_round_trips_through_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let builtin = BuiltinEmojiAssets::new();

    let written = builtin.write_to(temp_dir.path(), false).unwrap();
    assert_eq!(written.len(), 8);
    assert!(list_assets(temp_dir.path()).iter().all(|(_, _, exists)| *exists));

    let dir_assets = DirEmojiAssets::new(temp_dir.path());
    assert!(dir_assets.has_any());
    for category in EmojiCategory::ALL {
        let from_dir = dir_assets.emoji(category).unwrap().expect("asset on disk");
        let from_builtin = builtin.emoji(category).unwrap().unwrap();
        assert_eq!(from_dir.as_raw(), from_builtin.as_raw(), "{category}");
    }
}

#[test]
fn test_write_keeps_existing_files_unless_overwriting() {
    let temp_dir = tempfile::tempdir().unwrap();
    let builtin = BuiltinEmojiAssets::new();
    let smile = asset_path(temp_dir.path(), EmojiCategory::Smile);
    std::fs::write(&smile, b"custom").unwrap();

    let written = builtin.write_to(temp_dir.path(), false).unwrap();
    assert_eq!(written.len(), 7);
    assert_eq!(std::fs::read(&smile).unwrap(), b"custom");

    let written = builtin.write_to(temp_dir.path(), true).unwrap();
    assert_eq!(written.len(), 8);
    assert_ne!(std::fs::read(&smile).unwrap(), b"custom");
}

#[test]
fn test_partial_directory_reports_missing_category() {
    let temp_dir = tempfile::tempdir().unwrap();
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 255]));
    img.save(asset_path(temp_dir.path(), EmojiCategory::Frown))
        .unwrap();

    let assets = DirEmojiAssets::new(temp_dir.path());
    let frown = assets.emoji(EmojiCategory::Frown).unwrap().unwrap();
    assert_eq!(frown.dimensions(), (4, 4));
    assert!(assets.emoji(EmojiCategory::Smile).unwrap().is_none());
}

#[test]
fn test_undecodable_asset_is_an_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        asset_path(temp_dir.path(), EmojiCategory::LeftWink),
        b"garbage",
    )
    .unwrap();

    let assets = DirEmojiAssets::new(temp_dir.path());
    let err = assets.emoji(EmojiCategory::LeftWink).unwrap_err();
    assert!(err.to_string().contains("leftwink.png"));
}
