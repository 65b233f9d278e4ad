//! Integration tests for `unimod version`.

use std::process::Command;

fn cargo_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO"));
    cmd.args(["run", "-q", "-p", "unimod-cli", "--bin", "unimod", "--"]);
    cmd.env_remove("UNIMOD_PLATFORM");
    cmd.env_remove("UNIMOD_CONFIG");
    cmd
}

#[test]
fn test_version_prints_name() {
    let output = cargo_bin()
        .arg("version")
        .output()
        .expect("Failed to run version command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("unimod "));
}

#[test]
fn test_version_ignores_missing_config() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");

    let output = cargo_bin()
        .args(["--config", missing.to_str().unwrap(), "version"])
        .output()
        .expect("Failed to run version command");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("unimod "));
}

#[test]
fn test_resolve_reports_missing_config() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");

    let output = cargo_bin()
        .args(["--config", missing.to_str().unwrap(), "resolve", "/foo"])
        .output()
        .expect("Failed to run resolve command");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
