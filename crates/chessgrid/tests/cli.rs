//! Smoke tests for the `chessgrid` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn write_board(dir: &std::path::Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let image_path = dir.join("board.png");
    let corners_path = dir.join("board.json");

    let cell = 20u32;
    let side = cell * 8;
    let img = image::RgbImage::from_fn(side, side, |x, y| {
        let dark = ((y / cell) + (x / cell)) % 2 == 1;
        let v = if dark { 30 } else { 220 };
        image::Rgb([v, v, v])
    });
    img.save(&image_path).expect("saves png");

    let last = (side - 1) as f32;
    fs::write(
        &corners_path,
        format!("[[0.0,0.0],[{last},0.0],[{last},{last}],[0.0,{last}]]"),
    )
    .expect("writes corners");

    (image_path, corners_path)
}

#[test]
fn split_writes_64_named_squares() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (image_path, corners_path) = write_board(dir.path());
    let out_dir = dir.path().join("squares");

    Command::cargo_bin("chessgrid")
        .expect("binary")
        .args([
            "split",
            image_path.to_str().unwrap(),
            corners_path.to_str().unwrap(),
            "--out-dir",
            out_dir.to_str().unwrap(),
            "--out-size",
            "160",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote 64 squares"));

    assert_eq!(fs::read_dir(&out_dir).unwrap().count(), 64);
    assert!(out_dir.join("a1.png").exists());
    assert!(out_dir.join("h8.png").exists());
}

#[test]
fn warp_writes_topdown_view_and_homography() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (image_path, corners_path) = write_board(dir.path());
    let out_path = dir.path().join("topdown.png");
    let h_path = dir.path().join("h.json");

    Command::cargo_bin("chessgrid")
        .expect("binary")
        .args([
            "warp",
            image_path.to_str().unwrap(),
            corners_path.to_str().unwrap(),
            "--output",
            out_path.to_str().unwrap(),
            "--out-size",
            "160",
            "--homography",
            h_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let warped = image::open(&out_path).expect("readable");
    assert_eq!((warped.width(), warped.height()), (160, 160));

    let h: [[f64; 3]; 3] =
        serde_json::from_str(&fs::read_to_string(&h_path).expect("readable")).expect("3x3 matrix");
    assert!((h[2][2] - 1.0).abs() < 1e-9);
}

#[test]
fn build_dataset_single_mode_requires_its_flags() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (image_path, _) = write_board(dir.path());

    Command::cargo_bin("chessgrid")
        .expect("binary")
        .args([
            "build-dataset",
            "--image",
            image_path.to_str().unwrap(),
            "--dataset-root",
            dir.path().join("ds").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("single-image mode"));
}
