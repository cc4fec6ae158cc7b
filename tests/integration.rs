// Integration tests for the adscore CLI.
//
// These tests use assert_cmd to invoke the binary and verify
// exit codes and stdout/stderr output.

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to build a Command for the adscore binary.
fn adscore() -> Command {
    Command::cargo_bin("adscore").expect("binary should exist")
}

#[test]
fn cli_version_flag() {
    adscore()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("adscore"));
}

#[test]
fn cli_help_flag() {
    adscore()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Advertising creative scoring"));
}

#[test]
fn score_requires_input() {
    adscore()
        .arg("score")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn features_requires_input() {
    adscore()
        .arg("features")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn quiet_conflicts_with_verbose() {
    adscore()
        .args(["-q", "-v", "model"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
