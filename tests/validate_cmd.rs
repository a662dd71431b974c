use std::fs;

use assert_cmd::Command;
use tempfile::TempDir;

mod common;

#[test]
fn validate_command_ok() {
    let tmp = TempDir::new().unwrap();
    let models = tmp.path().join("models");
    let patterns = tmp.path().join("patterns.json");
    let input = tmp.path().join("reports.tsv");
    common::write_standard_models(&models);
    common::write_patterns(&patterns);
    common::write_reports(&input, &[("r1", "P1", "1", "ALK FISH positive")]);

    let mut cmd = Command::cargo_bin("kira-gentest").unwrap();
    cmd.arg("validate")
        .arg("--models")
        .arg(&models)
        .arg("--patterns")
        .arg(&patterns)
        .arg("--input")
        .arg(&input);
    let assert = cmd.assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("validate ok"));
    assert!(stdout.contains("EGFR: 4 stages loaded"));
    assert!(stdout.contains("patterns: 3 test rules, 1 section rules, 1 keyword rules"));
    assert!(stdout.contains("reports: 1"));
}

#[test]
fn validate_rejects_mismatched_artifacts() {
    let tmp = TempDir::new().unwrap();
    let models = tmp.path().join("models");
    let patterns = tmp.path().join("patterns.json");
    common::write_standard_models(&models);
    common::write_patterns(&patterns);
    fs::write(
        models.join("alk").join("method").join("features.txt"),
        "post_window=FISH 0\nother 1\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("kira-gentest").unwrap();
    cmd.arg("validate")
        .arg("--models")
        .arg(&models)
        .arg("--patterns")
        .arg(&patterns);
    cmd.assert().failure();
}

#[test]
fn validate_rejects_bad_patterns() {
    let tmp = TempDir::new().unwrap();
    let models = tmp.path().join("models");
    let patterns = tmp.path().join("patterns.json");
    common::write_standard_models(&models);
    fs::write(&patterns, r#"{"tests":{"ALK":["alk"]}}"#).unwrap();

    let mut cmd = Command::cargo_bin("kira-gentest").unwrap();
    cmd.arg("validate")
        .arg("--models")
        .arg(&models)
        .arg("--patterns")
        .arg(&patterns)
        .arg("--marker")
        .arg("egfr");
    cmd.assert().failure();
}
