use std::fs;
use std::path::Path;

use assert_cmd::Command;
use image::{Rgb, RgbImage};
use predicates::prelude::*;
use tempfile::tempdir;

const TWO_STRIPS: &str = r#"{
  "contours": [
    [[80, 15], [104, 15], [104, 59], [80, 59]],
    [[0, 100], [119, 100], [119, 119], [0, 119]],
    [[10, 20], [39, 20], [39, 59], [10, 59]]
  ]
}"#;

fn write(path: &Path, body: &str) {
    fs::write(path, body).expect("write fixture");
}

fn peg_target() -> Command {
    Command::cargo_bin("peg-target").expect("binary built")
}

#[test]
fn detect_prints_statistics_and_writes_report() {
    let dir = tempdir().expect("tempdir");
    let frame = dir.path().join("frame.json");
    let report = dir.path().join("out/report.json");
    write(&frame, TWO_STRIPS);

    peg_target()
        .arg("detect")
        .arg("--frame")
        .arg(&frame)
        .arg("--out")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("established=true complete=true"))
        .stdout(predicate::str::contains("left_edge=10 right_edge=105"))
        .stdout(predicate::str::contains("center_x=57"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).expect("report")).expect("json");
    assert_eq!(json["num_contours"], 3);
    assert_eq!(json["num_accepted"], 2);
    assert_eq!(json["evaluation"]["state"]["kind"], "complete");
    assert_eq!(json["evaluation"]["state"]["left"]["index"], 2);
    assert_eq!(json["evaluation"]["geometry"]["max_area"], 4275);
    assert_eq!(json["overlay"].as_array().map(Vec::len), Some(3));
}

#[test]
fn empty_frame_reports_sentinel_distance() {
    let dir = tempdir().expect("tempdir");
    let frame = dir.path().join("frame.json");
    let report = dir.path().join("report.json");
    write(&frame, r#"{ "contours": [] }"#);

    peg_target()
        .args(["detect", "--frame"])
        .arg(&frame)
        .arg("--out")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("established=false"))
        .stdout(predicate::str::contains("distance=99.900m"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).expect("report")).expect("json");
    assert_eq!(json["evaluation"]["state"]["kind"], "absent");
    assert_eq!(json["evaluation"]["distance_m"], 99.9);
}

#[test]
fn config_supplies_frame_and_filter() {
    let dir = tempdir().expect("tempdir");
    let frame = dir.path().join("frame.json");
    let config = dir.path().join("config.json");
    let report = dir.path().join("report.json");
    write(&frame, TWO_STRIPS);
    // a filter that accepts everything lets the wide blob win on area
    let cfg = serde_json::json!({
        "frame_path": frame,
        "output_path": report,
        "params": { "filter": {} }
    });
    write(&config, &cfg.to_string());

    peg_target()
        .args(["detect", "--config"])
        .arg(&config)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).expect("report")).expect("json");
    assert_eq!(json["num_accepted"], 3);
    assert_eq!(json["evaluation"]["state"]["left"]["index"], 1);
}

#[test]
fn invalid_config_fails() {
    let dir = tempdir().expect("tempdir");
    let frame = dir.path().join("frame.json");
    let config = dir.path().join("config.json");
    write(&frame, TWO_STRIPS);
    write(&config, r#"{ "params": { "camera": { "y_resolution": -1 } } }"#);

    peg_target()
        .args(["detect", "--frame"])
        .arg(&frame)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("y_resolution"));
}

#[test]
fn missing_frame_is_an_error() {
    peg_target()
        .arg("detect")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no frame given"));
}

#[test]
fn default_config_is_valid_json() {
    let output = peg_target()
        .arg("default-config")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).expect("json");
    assert_eq!(json["params"]["camera"]["vertical_fov_deg"], 39.8);
    assert_eq!(json["params"]["camera"]["y_resolution"], 240.0);
}

#[test]
fn overlay_is_drawn_onto_image() {
    let dir = tempdir().expect("tempdir");
    let frame = dir.path().join("frame.json");
    let image_in = dir.path().join("frame.png");
    let image_out = dir.path().join("overlay.png");
    write(&frame, TWO_STRIPS);
    RgbImage::new(160, 120).save(&image_in).expect("save input");

    peg_target()
        .args(["detect", "--frame"])
        .arg(&frame)
        .arg("--out")
        .arg(dir.path().join("report.json"))
        .arg("--image")
        .arg(&image_in)
        .arg("--overlay")
        .arg(&image_out)
        .assert()
        .success();

    let img = image::open(&image_out).expect("overlay").to_rgb8();
    // left strip top edge
    assert_eq!(img.get_pixel(20, 20), &Rgb([0, 255, 0]));
    // right strip left edge
    assert_eq!(img.get_pixel(80, 30), &Rgb([255, 0, 0]));
    // aggregate box top edge
    assert_eq!(img.get_pixel(50, 15), &Rgb([255, 255, 0]));
    // inside the gap between strips
    assert_eq!(img.get_pixel(60, 40), &Rgb([0, 0, 0]));
}

#[test]
fn image_without_overlay_path_is_rejected() {
    peg_target()
        .args(["detect", "--frame", "f.json", "--image", "in.png"])
        .assert()
        .failure();
}
