//! Integration tests for raster image loading.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::cast_possible_truncation)]

use image::{Rgb, RgbImage};
use selfie_check_adapters::FsImageSource;
use selfie_check_core::{ImageInfo, ImageSource};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_image(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let img = RgbImage::from_fn(8, 6, |x, y| Rgb([(x * 30) as u8, (y * 40) as u8, 128]));
    img.save(&path).expect("should encode fixture");
    path
}

fn load_single(path: PathBuf) -> ImageInfo {
    let source = FsImageSource::new(vec![path], false);
    let images: Vec<_> = source.images().collect();
    assert_eq!(images.len(), 1);
    images.into_iter().next().unwrap().expect("should load image")
}

#[test]
fn test_load_each_format() {
    let dir = TempDir::new().unwrap();

    for name in ["test.jpg", "test.png", "test.tiff", "test.bmp"] {
        let info = load_single(write_image(dir.path(), name));
        assert_eq!(info.width, 8, "{name}");
        assert_eq!(info.height, 6, "{name}");
        assert!(info.path.ends_with(name));
        assert!(!info.is_single_channel(), "{name}");
    }
}

#[test]
fn test_load_directory_skips_non_images() {
    let dir = TempDir::new().unwrap();
    write_image(dir.path(), "b.png");
    write_image(dir.path(), "a.jpg");
    std::fs::write(dir.path().join("a.jpg.landmarks.json"), r#"{"faces": []}"#).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();

    let source = FsImageSource::new(vec![dir.path().to_path_buf()], false);
    assert_eq!(source.count_hint(), Some(2));

    let paths: Vec<String> = source.images().map(|r| r.unwrap().path).collect();
    assert_eq!(paths.len(), 2);
    assert!(paths[0].ends_with("a.jpg"));
    assert!(paths[1].ends_with("b.png"));
}

#[test]
fn test_recursive_flag() {
    let dir = TempDir::new().unwrap();
    write_image(dir.path(), "top.png");
    let nested = dir.path().join("nested");
    std::fs::create_dir(&nested).unwrap();
    write_image(&nested, "deep.png");

    let flat = FsImageSource::new(vec![dir.path().to_path_buf()], false);
    assert_eq!(flat.count_hint(), Some(1));

    let recursive = FsImageSource::new(vec![dir.path().to_path_buf()], true);
    assert_eq!(recursive.count_hint(), Some(2));
}

#[test]
fn test_corrupt_image_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"not a png").unwrap();

    let source = FsImageSource::new(vec![path], false);
    let results: Vec<_> = source.images().collect();
    assert_eq!(results.len(), 1);

    let err = results.into_iter().next().unwrap().unwrap_err();
    assert!(err.to_string().contains("Failed to open image"));
}

#[test]
fn test_missing_path_yields_nothing() {
    let source = FsImageSource::new(vec![PathBuf::from("/nonexistent/selfie.jpg")], false);
    assert_eq!(source.count_hint(), Some(0));
    assert_eq!(source.images().count(), 0);
}
