use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("livechart").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("snapshot"));
}

#[test]
fn snapshot_writes_image_data_and_stats() {
    let dir = tempdir().unwrap();
    let settings = dir.path().join("settings.json");
    let out = dir.path().join("chart.svg");
    let data = dir.path().join("window.json");

    let mut cmd = Command::cargo_bin("livechart").unwrap();
    cmd.args(["snapshot", "--type", "bar", "--theme", "dark", "--seed", "9", "--ticks", "3", "--stats"])
        .arg("--config")
        .arg(&settings)
        .arg("--out")
        .arg(&out)
        .arg("--data")
        .arg(&data);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("current=").and(predicate::str::contains("trend=")));

    assert!(std::fs::read_to_string(&out).unwrap().contains("<svg"));
    let rows: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&data).unwrap()).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 46);
    // A missing settings file is created with defaults.
    assert!(settings.exists());
}

#[test]
fn run_prints_one_line_per_tick() {
    let dir = tempdir().unwrap();
    let settings = dir.path().join("settings.json");
    let mut cmd = Command::cargo_bin("livechart").unwrap();
    cmd.args(["run", "--interval", "10", "--ticks", "3", "--seed", "1"])
        .args(["--event", "1:theme dark", "--event", "2:type scatter"])
        .arg("--config")
        .arg(&settings);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("tick    3"));
}

#[test]
fn run_stops_when_paused() {
    let dir = tempdir().unwrap();
    let settings = dir.path().join("settings.json");
    let mut cmd = Command::cargo_bin("livechart").unwrap();
    cmd.args(["run", "--interval", "10", "--ticks", "50", "--event", "2:toggle"])
        .arg("--config")
        .arg(&settings);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("animation stopped at tick 2"));
}

#[test]
fn malformed_event_fails() {
    let dir = tempdir().unwrap();
    let settings = dir.path().join("settings.json");
    let mut cmd = Command::cargo_bin("livechart").unwrap();
    cmd.args(["run", "--event", "soon:reset"])
        .arg("--config")
        .arg(&settings);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid --event"));
}

#[test]
fn config_prints_effective_settings() {
    let dir = tempdir().unwrap();
    let settings = dir.path().join("settings.json");
    std::fs::write(&settings, r#"{"chart":{"theme":"contrast"}}"#).unwrap();
    let mut cmd = Command::cargo_bin("livechart").unwrap();
    cmd.arg("config").arg("--config").arg(&settings);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"theme\": \"contrast\""));
}
