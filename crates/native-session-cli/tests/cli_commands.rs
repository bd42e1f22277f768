// crates/native-session-cli/tests/cli_commands.rs
// ============================================================================
// Module: CLI Command Tests
// Description: Integration tests that run the native-session binary.
// Purpose: Ensure each subcommand produces stable output and fails closed.
// Dependencies: native-session-cli binary, tempfile
// ============================================================================

//! ## Overview
//! Runs the CLI binary from a scratch directory so the default config file is
//! absent unless a test writes one.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::missing_docs_in_private_items,
    clippy::panic_in_result_fn,
    reason = "Test-only panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use native_session_core::SessionPropertyRegistry;
use native_session_core::SessionPropertyReporter;
use native_session_core::StaticEngineDefaults;
use serde_json::Value;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn native_session_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_native-session"))
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(native_session_bin())
        .current_dir(dir)
        .env_remove("NATIVE_SESSION_CONFIG")
        .args(args)
        .output()
        .expect("run native-session")
}

// ============================================================================
// SECTION: Metadata
// ============================================================================

/// Verifies canonical metadata matches the library reporter byte for byte.
#[test]
fn metadata_canonical_matches_reporter() {
    let temp = tempfile::tempdir().unwrap();
    let output = run_in(temp.path(), &["metadata", "--canonical"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let registry = SessionPropertyRegistry::new(&StaticEngineDefaults::builtin());
    let mut expected = SessionPropertyReporter::new(&registry).canonical_bytes().unwrap();
    expected.push(b'\n');
    assert_eq!(output.stdout, expected);
}

/// Verifies configured engine defaults appear in the metadata output.
#[test]
fn metadata_reflects_config_file() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(
        temp.path().join("native-session.toml"),
        "[engine.defaults]\nmax_spill_level = \"6\"\n",
    )
    .unwrap();
    let output = run_in(temp.path(), &["metadata"]);
    assert!(output.status.success());

    let records: Value = serde_json::from_slice(&output.stdout).unwrap();
    let level = records
        .as_array()
        .unwrap()
        .iter()
        .find(|record| record["name"] == "native_max_spill_level")
        .unwrap();
    assert_eq!(level["defaultValue"], "6");
}

/// Verifies a missing explicit config path fails closed.
#[test]
fn explicit_missing_config_fails() {
    let temp = tempfile::tempdir().unwrap();
    let output = run_in(temp.path(), &["metadata", "--config", "absent.toml"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
}

// ============================================================================
// SECTION: Resolve
// ============================================================================

/// Verifies overrides are translated and unknown names pass through.
#[test]
fn resolve_translates_and_passes_through() {
    let temp = tempfile::tempdir().unwrap();
    let output = run_in(
        temp.path(),
        &[
            "resolve",
            "--set",
            "native_max_spill_level=2",
            "--set",
            "native_max_spill_level=3",
            "--set",
            "totally_unknown_prop=x",
        ],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let resolved: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(resolved["max_spill_level"], "3");
    assert_eq!(resolved["totally_unknown_prop"], "x");
    assert!(resolved.get("native_max_spill_level").is_none());
}

/// Verifies malformed overrides are rejected.
#[test]
fn resolve_rejects_malformed_override() {
    let temp = tempfile::tempdir().unwrap();
    let output = run_in(temp.path(), &["resolve", "--set", "no-equals-sign"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid argument"), "unexpected stderr: {stderr}");
}

// ============================================================================
// SECTION: Contract
// ============================================================================

/// Verifies generate then check succeeds, and drift makes check fail.
#[test]
fn generate_then_check_detects_drift() {
    let temp = tempfile::tempdir().unwrap();
    let generated = run_in(temp.path(), &["generate", "--out", "bundle"]);
    assert!(generated.status.success(), "stderr: {}", String::from_utf8_lossy(&generated.stderr));
    assert!(temp.path().join("bundle/index.json").is_file());

    let checked = run_in(temp.path(), &["check", "--out", "bundle"]);
    assert!(checked.status.success());

    fs::write(temp.path().join("bundle/session_properties.md"), "# stale\n").unwrap();
    let drifted = run_in(temp.path(), &["check", "--out", "bundle"]);
    assert!(!drifted.status.success());
}

/// Verifies the config file chooses the default output directory.
#[test]
fn generate_uses_configured_output_dir() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("native-session.toml"), "[contract]\noutput_dir = \"published\"\n")
        .unwrap();
    let output = run_in(temp.path(), &["generate"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(temp.path().join("published/session_properties.json").is_file());
}
