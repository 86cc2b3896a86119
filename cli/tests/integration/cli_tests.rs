//! Integration tests for the sctl CLI skeleton: help, version, global flags.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn sctl() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sctl"));
    cmd.env("NO_COLOR", "1");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_reports_missing_subcommand_and_exits_two() {
    sctl()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("requires a subcommand"))
        .stderr(predicate::str::contains("Usage: sctl"));
}

#[test]
fn test_cli_help_lists_subcommands() {
    let assert = sctl().arg("--help").assert().success();
    let out = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    for sub in ["project", "node", "service", "sync", "token", "config", "version"] {
        assert!(out.contains(sub), "help is missing `{sub}`:\n{out}");
    }
}

#[test]
fn test_cli_version_flag_shows_version() {
    sctl()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sctl"));
}

#[test]
fn test_version_command_shows_version() {
    sctl()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sctl 0.1.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let assert = sctl().args(["version", "--json"]).assert().success();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid json");
    assert_eq!(value["version"], "0.1.0");
}

// --- Argument parsing ---

#[test]
fn test_unknown_command_exits_with_error() {
    sctl()
        .arg("deploy-everything")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_service_start_requires_name() {
    sctl()
        .args(["service", "start"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<NAME>"));
}

#[test]
fn test_service_help_lists_actions() {
    sctl()
        .args(["service", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("start"))
        .stdout(predicate::str::contains("stop"))
        .stdout(predicate::str::contains("pull"))
        .stdout(predicate::str::contains("push"));
}

// --- Global flags ---

#[test]
fn test_no_color_env_accepts_conventional_values() {
    for value in ["1", "yes", "true", ""] {
        sctl()
            .arg("version")
            .env("NO_COLOR", value)
            .assert()
            .success()
            .stdout(predicate::str::contains("sctl 0.1.0"));
    }
}

#[test]
fn test_no_color_flag_still_parses() {
    sctl()
        .args(["version", "--no-color"])
        .env_remove("NO_COLOR")
        .assert()
        .success();
}
