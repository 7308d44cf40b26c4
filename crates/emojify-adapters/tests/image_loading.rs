//! Integration tests for loading images from the filesystem.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;

use emojify_adapters::FsImageSource;
use emojify_core::ImageSource;
use image::{DynamicImage, RgbImage};

fn write_image(path: &Path, width: u32, height: u32) {
    DynamicImage::ImageRgb8(RgbImage::new(width, height))
        .save(path)
        .unwrap();
}

#[test]
fn test_load_png() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("test.png");
    write_image(&path, 8, 6);

    let source = FsImageSource::new(vec![path], false);
    let images: Vec<_> = source.images().collect();
    assert_eq!(images.len(), 1);

    let info = images.into_iter().next().unwrap().expect("should load PNG");
    assert_eq!(info.width, 8);
    assert_eq!(info.height, 6);
    assert!(info.path.ends_with("test.png"));
}

#[test]
fn test_load_jpeg() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("test.jpg");
    write_image(&path, 16, 16);

    let source = FsImageSource::new(vec![path], false);
    let info = source.images().next().unwrap().expect("should load JPEG");
    assert_eq!((info.width, info.height), (16, 16));
}

#[test]
fn test_directory_skips_outputs_and_sidecars() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_image(&temp_dir.path().join("a.png"), 4, 4);
    write_image(&temp_dir.path().join("b.png"), 4, 4);
    write_image(&temp_dir.path().join("a_emojified.png"), 4, 4);
    std::fs::write(temp_dir.path().join("a.faces.json"), "[]").unwrap();

    let source = FsImageSource::new(vec![temp_dir.path().to_path_buf()], false);
    assert_eq!(source.count_hint(), Some(2));

    let paths: Vec<String> = source.images().map(|r| r.unwrap().path).collect();
    assert!(paths[0].ends_with("a.png"));
    assert!(paths[1].ends_with("b.png"));
}

#[test]
fn test_recursive_flag() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested = temp_dir.path().join("nested");
    std::fs::create_dir(&nested).unwrap();
    write_image(&temp_dir.path().join("top.png"), 4, 4);
    write_image(&nested.join("deep.png"), 4, 4);

    let flat = FsImageSource::new(vec![temp_dir.path().to_path_buf()], false);
    assert_eq!(flat.count_hint(), Some(1));

    let recursive = FsImageSource::new(vec![temp_dir.path().to_path_buf()], true);
    assert_eq!(recursive.count_hint(), Some(2));
}

#[test]
fn test_corrupt_image_is_an_error_item() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("broken.png");
    std::fs::write(&path, b"not a png").unwrap();

    let source = FsImageSource::new(vec![path], false);
    let result = source.images().next().unwrap();
    let err = result.unwrap_err();
    assert!(err.path.ends_with("broken.png"));
    assert!(format!("{:#}", err.error).contains("Failed to open image"));
}

#[test]
fn test_nonexistent_path_is_ignored() {
    let source = FsImageSource::new(vec!["/nonexistent/photo.png".into()], false);
    assert_eq!(source.count_hint(), Some(0));
    assert_eq!(source.images().count(), 0);
}
