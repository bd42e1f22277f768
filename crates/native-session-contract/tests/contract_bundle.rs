// crates/native-session-contract/tests/contract_bundle.rs
// ============================================================================
// Module: Contract Bundle Tests
// Description: Tests for deterministic contract bundle generation.
// Purpose: Validate stable outputs, schema conformance, and drift detection.
// Dependencies: native-session-contract, jsonschema, tempfile
// ============================================================================

//! ## Overview
//! These tests ensure contract generation is deterministic, that the metadata
//! document conforms to its published schema, and that verification catches
//! edited, missing, and unexpected files.

#![allow(clippy::use_debug, reason = "Failure messages include the unexpected result.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use jsonschema::Draft;
use native_session_config::DEFAULT_CONTRACT_OUTPUT_DIR;
use native_session_config::NativeSessionConfig;
use native_session_contract::ContractBuilder;
use native_session_contract::ContractError;
use native_session_contract::MANIFEST_FILE;
use native_session_contract::METADATA_ARTIFACT;
use native_session_contract::hashing::HashAlgorithm;
use native_session_contract::hashing::hash_bytes;
use native_session_core::StaticEngineDefaults;
use native_session_core::engine::keys;
use native_session_core::reporter::parse_metadata;
use serde_json::Value;

type TestResult = Result<(), Box<dyn std::error::Error>>;

// ============================================================================
// SECTION: Generation
// ============================================================================

/// Ensures contract bundle generation is deterministic.
#[test]
fn contract_bundle_is_deterministic() -> TestResult {
    let builder = ContractBuilder::default();
    let first = builder.build()?;
    let second = builder.build()?;
    if first != second {
        return Err("contract bundle is not deterministic".into());
    }
    let paths: Vec<&str> = first.artifacts.iter().map(|artifact| artifact.path.as_str()).collect();
    let expected = vec![
        "examples/native-session.toml",
        "schemas/config.schema.json",
        "schemas/session_properties.schema.json",
        "session_properties.json",
        "session_properties.md",
    ];
    if paths != expected {
        return Err(format!("unexpected artifact set: {paths:?}").into());
    }
    if first.manifest.property_count != 18 {
        return Err("manifest should count every property".into());
    }
    Ok(())
}

/// Ensures the metadata document validates against its published schema.
#[test]
fn metadata_document_matches_schema() -> TestResult {
    let bundle = ContractBuilder::default().build()?;
    let schema_artifact = bundle
        .artifact("schemas/session_properties.schema.json")
        .ok_or("missing metadata schema")?;
    let metadata_artifact = bundle.artifact(METADATA_ARTIFACT).ok_or("missing metadata")?;
    let schema: Value = serde_json::from_slice(&schema_artifact.bytes)?;
    let metadata: Value = serde_json::from_slice(&metadata_artifact.bytes)?;
    let validator = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .map_err(|err| err.to_string())?;
    if !validator.is_valid(&metadata) {
        return Err("metadata document violates its schema".into());
    }
    let records = parse_metadata(&metadata_artifact.bytes)?;
    if records.len() != 18 || records[0].name != "driver_cpu_time_slice_limit_ms" {
        return Err("metadata document should list properties by name".into());
    }
    Ok(())
}

/// Ensures the manifest digests match the artifact bytes.
#[test]
fn manifest_digests_cover_every_artifact() -> TestResult {
    let bundle = ContractBuilder::default().build()?;
    if bundle.manifest.artifacts.len() != bundle.artifacts.len() {
        return Err("manifest entry count mismatch".into());
    }
    for (entry, artifact) in bundle.manifest.artifacts.iter().zip(&bundle.artifacts) {
        let digest = hash_bytes(HashAlgorithm::Sha256, &artifact.bytes);
        if entry.path != artifact.path || entry.digest != digest {
            return Err(format!("digest mismatch for {}", artifact.path).into());
        }
    }
    Ok(())
}

/// Ensures engine defaults flow into the published metadata.
#[test]
fn engine_defaults_change_published_defaults() -> TestResult {
    let engine = StaticEngineDefaults::builtin().with_overrides([(keys::MAX_SPILL_LEVEL, "7")]);
    let custom = ContractBuilder::default().with_engine_defaults(engine).build()?;
    let stock = ContractBuilder::default().build()?;
    if custom.artifact(METADATA_ARTIFACT) == stock.artifact(METADATA_ARTIFACT) {
        return Err("metadata should reflect engine defaults".into());
    }
    let metadata = custom.artifact(METADATA_ARTIFACT).ok_or("missing metadata")?;
    let records = parse_metadata(&metadata.bytes)?;
    let level = records
        .iter()
        .find(|record| record.name == "native_max_spill_level")
        .ok_or("missing max spill level")?;
    if level.default_value != "7" {
        return Err(format!("unexpected default {}", level.default_value).into());
    }
    Ok(())
}

/// Ensures the builder and the config agree on the default output directory.
#[test]
fn default_output_dir_matches_config_default() -> TestResult {
    let from_config = NativeSessionConfig::default().contract.output_path();
    if ContractBuilder::default_output_dir() != from_config {
        return Err("contract default output dir drifted from config default".into());
    }
    if ContractBuilder::default().output_dir() != Path::new(DEFAULT_CONTRACT_OUTPUT_DIR) {
        return Err("default builder should target the shared output dir".into());
    }
    Ok(())
}

// ============================================================================
// SECTION: Verification
// ============================================================================

/// Ensures generated artifacts can be verified in place.
#[test]
fn contract_bundle_verifies() -> TestResult {
    let temp = tempfile::tempdir()?;
    let builder = ContractBuilder::new(temp.path().to_path_buf());
    builder.write()?;
    builder.verify_output(temp.path())?;
    Ok(())
}

/// Ensures an edited artifact is reported by path.
#[test]
fn verify_detects_edited_artifact() -> TestResult {
    let temp = tempfile::tempdir()?;
    let builder = ContractBuilder::default();
    builder.write_to(temp.path())?;
    fs::write(temp.path().join("session_properties.md"), "# edited\n")?;
    match builder.verify_output(temp.path()) {
        Err(ContractError::Generation(message)) if message.contains("session_properties.md") => {
            Ok(())
        }
        other => Err(format!("expected artifact mismatch, got {other:?}").into()),
    }
}

/// Ensures unexpected files fail verification.
#[test]
fn verify_detects_unexpected_file() -> TestResult {
    let temp = tempfile::tempdir()?;
    let builder = ContractBuilder::default();
    builder.write_to(temp.path())?;
    fs::write(temp.path().join("schemas/stale.schema.json"), "{}\n")?;
    match builder.verify_output(temp.path()) {
        Err(ContractError::Generation(message)) if message.contains("stale.schema.json") => Ok(()),
        other => Err(format!("expected unexpected artifact error, got {other:?}").into()),
    }
}

/// Ensures a missing manifest fails verification.
#[test]
fn verify_detects_missing_manifest() -> TestResult {
    let temp = tempfile::tempdir()?;
    let builder = ContractBuilder::default();
    builder.write_to(temp.path())?;
    fs::remove_file(temp.path().join(MANIFEST_FILE))?;
    if builder.verify_output(temp.path()).is_ok() {
        return Err("verification should fail without index.json".into());
    }
    Ok(())
}

/// Ensures verification against a missing directory reports the path.
#[test]
fn verify_rejects_missing_directory() -> TestResult {
    let temp = tempfile::tempdir()?;
    let missing = temp.path().join("absent");
    match ContractBuilder::default().verify_output(&missing) {
        Err(ContractError::OutputPath(path)) if path == missing => Ok(()),
        other => Err(format!("expected output path error, got {other:?}").into()),
    }
}
