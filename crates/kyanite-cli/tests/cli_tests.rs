// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
//! End-to-end checks of the `kyanite` binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SCENE: &str = r#"{ "shapes": [
  { "id": 0, "kind": { "type": "rectangle", "width": 10, "height": 10 } },
  { "id": 1, "kind": { "type": "circle", "radius": 4 }, "position": [7, 1] },
  { "id": 2, "kind": { "type": "convex", "points": [[0,0],[4,0],[0,4]] },
    "position": [50, 50] },
  { "id": 7, "kind": { "type": "rectangle", "width": 2, "height": 2 },
    "position": [4, 4] }
] }"#;

fn kyanite(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("kyanite").unwrap();
    cmd.env_remove("RUST_LOG").arg("--config-dir").arg(config);
    cmd
}

fn write_scene(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("scene.json");
    std::fs::write(&path, SCENE).unwrap();
    path
}

#[test]
fn default_transform_is_identity() {
    let cfg = TempDir::new().unwrap();
    let out = kyanite(cfg.path())
        .args(["transform", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let identity = serde_json::json!([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
    assert_eq!(json["matrix"], identity);
    assert_eq!(json["inverse"], identity);
}

#[test]
fn transform_accepts_negative_pairs() {
    let cfg = TempDir::new().unwrap();
    let out = kyanite(cfg.path())
        .args(["transform", "--position", "-3,4", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["matrix"][0][2], serde_json::json!(-3.0));
    assert_eq!(json["inverse"][0][2], serde_json::json!(3.0));
}

#[test]
fn transform_text_output_has_both_tables() {
    let cfg = TempDir::new().unwrap();
    kyanite(cfg.path())
        .args(["transform", "--rotation", "90"])
        .assert()
        .success()
        .stdout(predicate::str::contains("matrix").and(predicate::str::contains("inverse")));
}

#[test]
fn malformed_pair_is_rejected() {
    let cfg = TempDir::new().unwrap();
    kyanite(cfg.path())
        .args(["transform", "--scale", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected X,Y"));
}

#[test]
fn collide_reports_overlapping_pairs() {
    let cfg = TempDir::new().unwrap();
    let scene = write_scene(&cfg);
    let out = kyanite(cfg.path())
        .arg("collide")
        .arg(&scene)
        .args(["--algorithm", "aabb", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["algorithm"], "aabb");
    assert_eq!(json["shapes"], 4);
    assert_eq!(json["candidates"], 2);
    assert_eq!(json["pairs"], serde_json::json!([[0, 1], [0, 7]]));
}

#[test]
fn edges_algorithm_drops_nested_shape() {
    let cfg = TempDir::new().unwrap();
    let scene = write_scene(&cfg);
    let out = kyanite(cfg.path())
        .arg("collide")
        .arg(&scene)
        .args(["--algorithm", "edges", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    // Shape 7 sits wholly inside shape 0, so only crossing outlines remain.
    let pairs = json["pairs"].as_array().unwrap();
    assert!(pairs.contains(&serde_json::json!([0, 1])), "{pairs:?}");
    assert!(!pairs.contains(&serde_json::json!([0, 7])), "{pairs:?}");
}

#[test]
fn saved_prefs_choose_the_algorithm() {
    let cfg = TempDir::new().unwrap();
    std::fs::write(
        cfg.path().join("kyanite.json"),
        r#"{"version":1,"collision":{"algorithm":"edges"}}"#,
    )
    .unwrap();
    let scene = write_scene(&cfg);
    kyanite(cfg.path())
        .arg("collide")
        .arg(&scene)
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"edges\""));
    kyanite(cfg.path())
        .arg("collide")
        .arg(&scene)
        .args(["--algorithm", "aabb", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"aabb\""));
}

#[test]
fn broken_prefs_section_warns_and_uses_defaults() {
    let cfg = TempDir::new().unwrap();
    std::fs::write(
        cfg.path().join("kyanite.json"),
        r#"{"collision":{"circle_point_count":18446744073709551615}}"#,
    )
    .unwrap();
    let scene = write_scene(&cfg);
    kyanite(cfg.path())
        .arg("collide")
        .arg(&scene)
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"aabb\""))
        .stderr(predicate::str::contains("ignoring prefs section"));
}

#[test]
fn oversized_circle_in_scene_is_an_error() {
    let cfg = TempDir::new().unwrap();
    let path = cfg.path().join("huge.json");
    std::fs::write(
        &path,
        r#"{"shapes":[{"id":0,"kind":{"type":"circle","radius":1,"point_count":18446744073709551615}}]}"#,
    )
    .unwrap();
    kyanite(cfg.path())
        .arg("collide")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("more than"));
}

#[test]
fn missing_scene_fails_with_context() {
    let cfg = TempDir::new().unwrap();
    kyanite(cfg.path())
        .args(["collide", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read scene"));
}
