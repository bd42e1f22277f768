// crates/native-session-contract/src/contract.rs
// ============================================================================
// Module: Contract Builder
// Description: Generator for session property contract artifacts.
// Purpose: Assemble deterministic contract outputs and write them to disk.
// Dependencies: native-session-core, native-session-config, serde_jcs
// ============================================================================

//! ## Overview
//! The contract builder renders the session property metadata document, its
//! schema, a markdown reference, the config schema, and an example config.
//! JSON is emitted pretty-printed with canonical key ordering, and every
//! artifact is hashed into the `index.json` manifest. Verification rebuilds the
//! bundle and compares it byte-for-byte with the files on disk.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use native_session_config as config;
use native_session_core::NoopAuditSink;
use native_session_core::SessionPropertyRegistry;
use native_session_core::SessionPropertyReporter;
use native_session_core::StaticEngineDefaults;
use serde::Serialize;

use crate::ContractError;
use crate::hashing::DEFAULT_HASH_ALGORITHM;
use crate::hashing::HashAlgorithm;
use crate::hashing::hash_bytes;
use crate::markdown;
use crate::schemas;
use crate::types::ContractArtifact;
use crate::types::ContractBundle;
use crate::types::ContractManifest;
use crate::types::ManifestArtifact;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Manifest file name written alongside the artifacts.
pub const MANIFEST_FILE: &str = "index.json";
/// Metadata document artifact path.
pub const METADATA_ARTIFACT: &str = "session_properties.json";

// ============================================================================
// SECTION: Contract Builder
// ============================================================================

/// Builder for session property contract artifacts.
#[derive(Debug, Clone)]
pub struct ContractBuilder {
    /// Output directory for generated artifacts.
    output_dir: PathBuf,
    /// Contract version identifier.
    contract_version: String,
    /// Hash algorithm used for artifact digests.
    hash_algorithm: HashAlgorithm,
    /// Engine defaults used to resolve property defaults.
    engine: StaticEngineDefaults,
}

impl ContractBuilder {
    /// Creates a builder targeting the output directory with built-in engine defaults.
    #[must_use]
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            contract_version: env!("CARGO_PKG_VERSION").to_string(),
            hash_algorithm: DEFAULT_HASH_ALGORITHM,
            engine: StaticEngineDefaults::builtin(),
        }
    }

    /// Replaces the engine defaults used to resolve property defaults.
    #[must_use]
    pub fn with_engine_defaults(mut self, engine: StaticEngineDefaults) -> Self {
        self.engine = engine;
        self
    }

    /// Returns the default output directory for generated artifacts.
    #[must_use]
    pub fn default_output_dir() -> PathBuf {
        PathBuf::from(config::DEFAULT_CONTRACT_OUTPUT_DIR)
    }

    /// Returns the configured output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Builds the contract bundle without writing to disk.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when contract generation fails.
    pub fn build(&self) -> Result<ContractBundle, ContractError> {
        let registry = SessionPropertyRegistry::with_audit(&self.engine, Arc::new(NoopAuditSink));
        let records = SessionPropertyReporter::new(&registry).metadata();
        let mut artifacts = vec![
            json_artifact(METADATA_ARTIFACT, &records)?,
            markdown_artifact(
                "session_properties.md",
                markdown::session_properties_markdown(&records),
            ),
            json_artifact(
                "schemas/session_properties.schema.json",
                &schemas::session_properties_schema(),
            )?,
            json_artifact("schemas/config.schema.json", &config::config_schema())?,
            text_artifact(
                "examples/native-session.toml",
                config::config_toml_example(),
                "application/toml",
            ),
        ];

        artifacts.sort_by(|lhs, rhs| lhs.path.cmp(&rhs.path));
        ensure_unique_paths(&artifacts)?;

        let manifest = ContractManifest {
            contract_version: self.contract_version.clone(),
            hash_algorithm: self.hash_algorithm,
            property_count: records.len(),
            artifacts: manifest_entries(self.hash_algorithm, &artifacts),
        };

        Ok(ContractBundle {
            manifest,
            artifacts,
        })
    }

    /// Writes the contract bundle to the configured output directory.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when writing fails.
    pub fn write(&self) -> Result<ContractManifest, ContractError> {
        self.write_to(&self.output_dir)
    }

    /// Writes the contract bundle to the specified output directory.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when writing fails.
    pub fn write_to(&self, output_dir: &Path) -> Result<ContractManifest, ContractError> {
        let bundle = self.build()?;
        ensure_output_dir(output_dir)?;
        for artifact in &bundle.artifacts {
            write_artifact(output_dir, artifact)?;
        }
        let manifest_bytes = serialize_json_pretty(&bundle.manifest)?;
        fs::write(output_dir.join(MANIFEST_FILE), &manifest_bytes)
            .map_err(|err| ContractError::Io(err.to_string()))?;
        Ok(bundle.manifest)
    }

    /// Verifies the on-disk contract bundle matches the generated bundle.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Generation`] naming the first drifted,
    /// missing, or unexpected file.
    pub fn verify_output(&self, output_dir: &Path) -> Result<(), ContractError> {
        let bundle = self.build()?;
        if !output_dir.is_dir() {
            return Err(ContractError::OutputPath(output_dir.to_path_buf()));
        }
        for artifact in &bundle.artifacts {
            let bytes = fs::read(output_dir.join(&artifact.path))
                .map_err(|err| ContractError::Io(format!("{}: {err}", artifact.path)))?;
            if bytes != artifact.bytes {
                return Err(ContractError::Generation(format!(
                    "artifact mismatch: {}",
                    artifact.path
                )));
            }
        }
        let manifest_bytes = serialize_json_pretty(&bundle.manifest)?;
        let actual_manifest = fs::read(output_dir.join(MANIFEST_FILE))
            .map_err(|err| ContractError::Io(format!("{MANIFEST_FILE}: {err}")))?;
        if actual_manifest != manifest_bytes {
            return Err(ContractError::Generation(format!("manifest mismatch: {MANIFEST_FILE}")));
        }
        let expected = expected_paths(&bundle);
        for path in collect_output_files(output_dir)? {
            if !expected.contains(&path) {
                return Err(ContractError::Generation(format!("unexpected artifact: {path}")));
            }
        }
        Ok(())
    }
}

impl Default for ContractBuilder {
    fn default() -> Self {
        Self::new(Self::default_output_dir())
    }
}

// ============================================================================
// SECTION: Artifact Helpers
// ============================================================================

/// Builds a JSON artifact with canonical key ordering and pretty layout.
fn json_artifact<T: Serialize>(path: &str, value: &T) -> Result<ContractArtifact, ContractError> {
    Ok(ContractArtifact {
        path: path.to_string(),
        content_type: String::from("application/json"),
        bytes: serialize_json_pretty(value)?,
    })
}

/// Builds a markdown artifact from content.
fn markdown_artifact(path: &str, content: String) -> ContractArtifact {
    text_artifact(path, content, "text/markdown")
}

/// Builds a text artifact from content.
fn text_artifact(path: &str, content: String, content_type: &str) -> ContractArtifact {
    ContractArtifact {
        path: path.to_string(),
        content_type: content_type.to_string(),
        bytes: content.into_bytes(),
    }
}

/// Serializes a value into pretty JSON bytes with canonical key ordering.
pub(crate) fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<Vec<u8>, ContractError> {
    let canonical =
        serde_jcs::to_vec(value).map_err(|err| ContractError::Serialization(err.to_string()))?;
    let canonical_value: serde_json::Value = serde_json::from_slice(&canonical)
        .map_err(|err| ContractError::Serialization(err.to_string()))?;
    let mut bytes = serde_json::to_vec_pretty(&canonical_value)
        .map_err(|err| ContractError::Serialization(err.to_string()))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Hashes each artifact into a manifest entry.
fn manifest_entries(
    algorithm: HashAlgorithm,
    artifacts: &[ContractArtifact],
) -> Vec<ManifestArtifact> {
    artifacts
        .iter()
        .map(|artifact| ManifestArtifact {
            path: artifact.path.clone(),
            content_type: artifact.content_type.clone(),
            digest: hash_bytes(algorithm, &artifact.bytes),
        })
        .collect()
}

/// Ensures artifact paths are unique.
fn ensure_unique_paths(artifacts: &[ContractArtifact]) -> Result<(), ContractError> {
    let mut seen = BTreeSet::new();
    for artifact in artifacts {
        if !seen.insert(&artifact.path) {
            return Err(ContractError::Generation(format!(
                "duplicate artifact path: {}",
                artifact.path
            )));
        }
    }
    Ok(())
}

/// Ensures the output directory exists, creating it if necessary.
fn ensure_output_dir(output_dir: &Path) -> Result<(), ContractError> {
    if output_dir.as_os_str().is_empty() {
        return Err(ContractError::OutputPath(output_dir.to_path_buf()));
    }
    if output_dir.exists() {
        if !output_dir.is_dir() {
            return Err(ContractError::OutputPath(output_dir.to_path_buf()));
        }
        return Ok(());
    }
    fs::create_dir_all(output_dir).map_err(|err| ContractError::Io(err.to_string()))
}

/// Writes a single artifact to the output directory.
fn write_artifact(output_dir: &Path, artifact: &ContractArtifact) -> Result<(), ContractError> {
    let relative = validate_relative_path(&artifact.path)?;
    let target = output_dir.join(&relative);
    let parent = target.parent().ok_or_else(|| ContractError::OutputPath(target.clone()))?;
    fs::create_dir_all(parent).map_err(|err| ContractError::Io(err.to_string()))?;
    fs::write(&target, &artifact.bytes).map_err(|err| ContractError::Io(err.to_string()))
}

/// Validates that the artifact path is relative and stays under the output root.
pub(crate) fn validate_relative_path(path: &str) -> Result<PathBuf, ContractError> {
    if path.trim().is_empty() {
        return Err(ContractError::Generation(String::from("artifact path is empty")));
    }
    let candidate = PathBuf::from(path);
    if candidate.is_absolute() {
        return Err(ContractError::Generation(format!("artifact path must be relative: {path}")));
    }
    for component in candidate.components() {
        if matches!(component, Component::ParentDir | Component::RootDir | Component::Prefix(_)) {
            return Err(ContractError::Generation(format!(
                "artifact path contains invalid component: {path}"
            )));
        }
    }
    Ok(candidate)
}

/// Collects the expected output paths for verification.
fn expected_paths(bundle: &ContractBundle) -> BTreeSet<String> {
    let mut expected: BTreeSet<String> =
        bundle.artifacts.iter().map(|artifact| artifact.path.clone()).collect();
    expected.insert(MANIFEST_FILE.to_string());
    expected
}

/// Recursively collects file paths under the output directory.
fn collect_output_files(output_dir: &Path) -> Result<BTreeSet<String>, ContractError> {
    let mut files = BTreeSet::new();
    collect_files_recursive(output_dir, output_dir, &mut files)?;
    Ok(files)
}

/// Recursively collects file paths relative to the root directory.
fn collect_files_recursive(
    root: &Path,
    current: &Path,
    files: &mut BTreeSet<String>,
) -> Result<(), ContractError> {
    let entries = fs::read_dir(current).map_err(|err| ContractError::Io(err.to_string()))?;
    for entry in entries {
        let path = entry.map_err(|err| ContractError::Io(err.to_string()))?.path();
        if path.is_dir() {
            collect_files_recursive(root, &path, files)?;
        } else if path.is_file() {
            let relative =
                path.strip_prefix(root).map_err(|_| ContractError::OutputPath(path.clone()))?;
            let text = relative
                .to_str()
                .ok_or_else(|| ContractError::OutputPath(relative.to_path_buf()))?;
            files.insert(text.replace('\\', "/"));
        }
    }
    Ok(())
}
