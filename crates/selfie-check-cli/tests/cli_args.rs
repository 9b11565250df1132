//! CLI argument validation tests.
//!
//! Tests command-line argument parsing, validation, and error handling.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use selfie_check_test_support::{FaceLandmarksBuilder, SyntheticImageBuilder};

/// Writes a 200x200 selfie PNG and, when given, its pixel-space sidecar.
fn write_selfie(dir: &Path, name: &str, face: Option<&FaceLandmarksBuilder>) -> PathBuf {
    let path = dir.join(name);
    SyntheticImageBuilder::selfie_backdrop(200, 200)
        .image
        .save(&path)
        .unwrap();
    if let Some(face) = face {
        let points: Vec<[f64; 2]> = face.build().points().iter().map(|p| [p.x, p.y]).collect();
        let sidecar = serde_json::json!({ "coordinates": "pixel", "faces": [points] });
        fs::write(dir.join(format!("{name}.landmarks.json")), sidecar.to_string()).unwrap();
    }
    path
}

fn frontal_face() -> FaceLandmarksBuilder {
    FaceLandmarksBuilder::centered(200, 200, 80.0, 96.0)
}

// === Missing/Invalid Path Tests ===

#[test]
fn test_missing_path_shows_error() {
    let mut cmd = Command::cargo_bin("selfie-check").unwrap();
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("No paths specified"));
}

#[test]
fn test_nonexistent_path_warns_but_continues() {
    let mut cmd = Command::cargo_bin("selfie-check").unwrap();
    cmd.arg("/nonexistent/path/to/selfie.jpg");

    // No images validated = nothing rejected
    cmd.assert()
        .code(0)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_empty_directory() {
    let temp_dir = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("selfie-check").unwrap();
    cmd.arg(temp_dir.path());

    cmd.assert().code(0).stdout(predicate::str::is_empty());
}

// === Exit Codes ===

#[test]
fn test_valid_selfie_exits_zero() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = write_selfie(temp_dir.path(), "me.png", Some(&frontal_face()));

    let mut cmd = Command::cargo_bin("selfie-check").unwrap();
    cmd.arg(&path);

    cmd.assert().code(0);
}

#[test]
fn test_rejected_selfie_exits_one() {
    let temp_dir = tempfile::tempdir().unwrap();
    // No sidecar: detection fails
    let path = write_selfie(temp_dir.path(), "me.png", None);

    let mut cmd = Command::cargo_bin("selfie-check").unwrap();
    cmd.arg(&path);

    cmd.assert().code(1);
}

// === Format Validation Tests ===

#[test]
fn test_invalid_format_rejected() {
    let mut cmd = Command::cargo_bin("selfie-check").unwrap();
    cmd.arg("--format").arg("xml").arg("me.png");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("json").or(predicate::str::contains("jsonl")));
}

#[test]
fn test_valid_formats_accepted() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = write_selfie(temp_dir.path(), "me.png", Some(&frontal_face()));

    for format in ["json", "jsonl"] {
        let mut cmd = Command::cargo_bin("selfie-check").unwrap();
        cmd.arg("--format").arg(format).arg(&path);
        cmd.assert().code(0);
    }
}

// === Threshold Validation Tests ===

#[test]
fn test_min_face_ratio_above_one_rejected() {
    let mut cmd = Command::cargo_bin("selfie-check").unwrap();
    cmd.arg("--min-face-ratio").arg("1.5").arg("me.png");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("0.0..=1.0"));
}

#[test]
fn test_max_center_offset_negative_rejected() {
    let mut cmd = Command::cargo_bin("selfie-check").unwrap();
    cmd.arg("--max-center-offset=-0.1").arg("me.png");

    cmd.assert().failure();
}

#[test]
fn test_color_threshold_non_numeric_rejected() {
    let mut cmd = Command::cargo_bin("selfie-check").unwrap();
    cmd.arg("--color-threshold").arg("abc").arg("me.png");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid"));
}

#[test]
fn test_saturation_threshold_out_of_range() {
    let mut cmd = Command::cargo_bin("selfie-check").unwrap();
    cmd.arg("--saturation-threshold").arg("300").arg("me.png");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("0..=255"));
}

#[test]
fn test_threshold_flag_changes_decision() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = write_selfie(temp_dir.path(), "me.png", Some(&frontal_face()));

    // Face ratio is 0.192
    let mut cmd = Command::cargo_bin("selfie-check").unwrap();
    cmd.arg("--min-face-ratio").arg("0.25").arg(&path);

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("face_too_small"));
}

// === Verbosity Level Tests ===

#[test]
fn test_verbosity_v() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = write_selfie(temp_dir.path(), "me.png", Some(&frontal_face()));

    let mut cmd = Command::cargo_bin("selfie-check").unwrap();
    cmd.arg("-v").arg(&path);

    cmd.assert()
        .code(0)
        .stderr(predicate::str::contains("Running check command"));
}

#[test]
fn test_verbosity_vv_shows_measurements() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = write_selfie(temp_dir.path(), "me.png", Some(&frontal_face()));

    let mut cmd = Command::cargo_bin("selfie-check").unwrap();
    cmd.arg("-vv").arg(&path);

    cmd.assert()
        .code(0)
        .stderr(predicate::str::contains("area ratio"));
}

#[test]
fn test_verbosity_vvv() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = write_selfie(temp_dir.path(), "me.png", Some(&frontal_face()));

    let mut cmd = Command::cargo_bin("selfie-check").unwrap();
    cmd.arg("-vvv").arg(&path);

    cmd.assert().code(0);
}

#[test]
fn test_quiet_suppresses_rejection_lines() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = write_selfie(temp_dir.path(), "me.png", None);

    let mut cmd = Command::cargo_bin("selfie-check").unwrap();
    cmd.arg("--quiet").arg(&path);

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("rejected:").not());
}

#[test]
fn test_rejection_reported_on_stderr() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = write_selfie(temp_dir.path(), "me.png", None);

    let mut cmd = Command::cargo_bin("selfie-check").unwrap();
    cmd.arg(&path);

    cmd.assert().code(1).stderr(predicate::str::contains(
        "rejected: Face detection failed, please try again",
    ));
}

// === Multiple Paths ===

#[test]
fn test_multiple_paths() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = write_selfie(temp_dir.path(), "me.png", Some(&frontal_face()));

    let mut cmd = Command::cargo_bin("selfie-check").unwrap();
    cmd.arg(&path).arg(&path); // Same file twice

    cmd.assert().code(0);
}

// === Recursive Flag ===

#[test]
fn test_recursive_flag() {
    let temp_dir = tempfile::tempdir().unwrap();
    let sub_dir = temp_dir.path().join("subdir");
    fs::create_dir(&sub_dir).unwrap();
    // Rejected image: only found with -r
    write_selfie(&sub_dir, "me.png", None);

    let mut cmd = Command::cargo_bin("selfie-check").unwrap();
    cmd.arg(temp_dir.path());
    cmd.assert().code(0); // No images found at top level

    let mut cmd2 = Command::cargo_bin("selfie-check").unwrap();
    cmd2.arg("-r").arg(temp_dir.path());
    cmd2.assert().code(1); // Found and rejected
}

// === Landmarks Directory ===

#[test]
fn test_landmarks_dir_flag() {
    let images = tempfile::tempdir().unwrap();
    let marks = tempfile::tempdir().unwrap();
    let path = write_selfie(images.path(), "me.png", Some(&frontal_face()));
    fs::rename(
        images.path().join("me.png.landmarks.json"),
        marks.path().join("me.png.landmarks.json"),
    )
    .unwrap();

    // Sidecar moved away: rejected without the flag
    let mut cmd = Command::cargo_bin("selfie-check").unwrap();
    cmd.arg(&path);
    cmd.assert().code(1);

    let mut cmd2 = Command::cargo_bin("selfie-check").unwrap();
    cmd2.arg("--landmarks-dir").arg(marks.path()).arg(&path);
    cmd2.assert().code(0);
}

// === Help and Version ===

#[test]
fn test_help_flag() {
    let mut cmd = Command::cargo_bin("selfie-check").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("--min-face-ratio"))
        .stdout(predicate::str::contains("--landmarks-dir"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn test_version_flag() {
    let mut cmd = Command::cargo_bin("selfie-check").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("selfie-check"));
}

// === Subcommands ===

#[test]
fn test_check_subcommand() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = write_selfie(temp_dir.path(), "me.png", Some(&frontal_face()));

    let mut cmd = Command::cargo_bin("selfie-check").unwrap();
    cmd.arg("check").arg("--color-threshold").arg("12").arg(&path);

    cmd.assert().code(0);
}

#[test]
fn test_thresholds_subcommand_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("selfie-check").unwrap();
    cmd.current_dir(temp_dir.path())
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .arg("thresholds");

    let output = cmd.output().unwrap();
    assert_eq!(output.status.code(), Some(0));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["quality"]["color_threshold"], 10.0);
    assert_eq!(value["quality"]["saturation_threshold"], 25.0);
    assert_eq!(value["geometry"]["min_face_ratio"], 0.15);
    assert_eq!(value["geometry"]["max_aspect_ratio"], 1.7);
    assert_eq!(value["layout"]["left_eye"], 33);
    assert_eq!(value["layout"]["right_eye"], 263);
    assert_eq!(value["layout"]["nose_tip"], 1);
}

#[test]
fn test_thresholds_subcommand_flags() {
    let temp_dir = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("selfie-check").unwrap();
    cmd.current_dir(temp_dir.path())
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .arg("thresholds")
        .arg("--min-face-ratio")
        .arg("0.3");

    let output = cmd.output().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["geometry"]["min_face_ratio"], 0.3);
}
