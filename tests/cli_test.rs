//! Integration tests for the tome binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn cli_no_args_prints_usage() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("tome"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("setup-project"));
    Ok(())
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("tome"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Arcanist"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("tome"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_install_help_lists_flags() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("tome"));
    cmd.args(["install", "--help"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--arcbase-dir"))
        .stdout(predicate::str::contains("--user"));
    Ok(())
}

#[test]
fn cli_setup_project_writes_arcconfig() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("tome"));
    cmd.current_dir(temp.path());
    cmd.args(["--no-color", "setup-project", "https://phab.example.com"]);
    cmd.assert().success();

    let content = fs::read_to_string(temp.path().join(".arcconfig"))?;
    assert_eq!(
        content,
        "{\n    \"phabricator.uri\": \"https://phab.example.com\"\n}"
    );
    Ok(())
}

#[test]
fn cli_setup_project_overwrites_existing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join(".arcconfig"), "{\"phabricator.uri\": \"old\"}")?;

    let mut cmd = Command::new(cargo_bin("tome"));
    cmd.current_dir(temp.path());
    cmd.args(["setup-project", "https://new.example.com"]);
    cmd.assert().success();

    let content = fs::read_to_string(temp.path().join(".arcconfig"))?;
    assert!(content.contains("https://new.example.com"));
    assert!(!content.contains("old"));
    Ok(())
}

#[test]
fn cli_setup_project_requires_uri() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("tome"));
    cmd.arg("setup-project");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("PHAB_URI"));
    Ok(())
}

#[test]
fn cli_unknown_subcommand_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("tome"));
    cmd.arg("frobnicate");
    cmd.assert().failure();
    Ok(())
}

#[test]
fn cli_malformed_settings_exit_code_1() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("config.json"), "{ broken")?;

    let mut cmd = Command::new(cargo_bin("tome"));
    cmd.args(["--no-color", "install", "--user", "--arcbase-dir"]);
    cmd.arg(temp.path());
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid configuration"));
    Ok(())
}
