//! Integration tests for sill CLI argument handling.
//!
//! Every case here fails before any window or monitor is queried, so the
//! tests run without a display.

use std::process::{Command, Output};

fn run_sill(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sill"))
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute 'sill {}': {}", args.join(" "), e))
}

#[test]
fn test_version_succeeds() {
    let output = run_sill(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_subcommand_prints_help_and_fails() {
    let output = run_sill(&[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr: {}", stderr);
}

#[test]
fn test_zero_frames_rejected() {
    let output = run_sill(&["run", "--frames", "0"]);
    assert!(!output.status.success());
}

#[test]
fn test_unknown_debug_mode_rejected() {
    let output = run_sill(&["run", "--debug-mode", "sideways"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("sideways"), "stderr: {}", stderr);
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let output = run_sill(&["--config", missing.to_str().unwrap(), "borders"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load config"), "stderr: {}", stderr);
}

#[test]
fn test_invalid_config_fails_without_logs_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[pipeline]\ntitle_cache_capacity = 0\n").unwrap();

    let output = run_sill(&["borders", "--config", path.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load config"), "stderr: {}", stderr);
    assert!(
        !stderr.contains(r#""level":"INFO""#),
        "Default mode should suppress INFO logs, but stderr contains: {}",
        stderr
    );
}
