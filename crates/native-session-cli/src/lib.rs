// crates/native-session-cli/src/lib.rs
// ============================================================================
// Module: Native Session CLI Library
// Description: Command implementations for the native-session binary.
// Purpose: Keep command logic testable apart from argument parsing.
// Dependencies: native-session-core, native-session-config, native-session-contract
// ============================================================================

//! ## Overview
//! Each command takes a loaded [`NativeSessionConfig`] and returns bytes or a
//! manifest; the binary only parses flags and writes results to stdout.
//!
//! - `metadata`: the coordinator metadata document.
//! - `resolve`: the engine config produced by defaults plus `name=value`
//!   session overrides.
//! - `generate` / `check`: write or verify the contract bundle.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use native_session_config::ConfigError;
use native_session_config::NativeSessionConfig;
use native_session_contract::ContractBuilder;
use native_session_contract::ContractError;
use native_session_contract::ContractManifest;
use native_session_core::RegistryError;
use native_session_core::SessionPropertyReporter;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Contract generation or verification failed.
    #[error(transparent)]
    Contract(#[from] ContractError),
    /// Metadata rendering failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// A command-line argument was malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Output could not be rendered or written.
    #[error("output error: {0}")]
    Output(String),
}

/// CLI result alias for fallible operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Argument Parsing
// ============================================================================

/// Parses a `name=value` session override.
///
/// The name is trimmed and must be non-empty; the value is kept verbatim and
/// may be empty or contain further `=` characters.
///
/// # Errors
///
/// Returns [`CliError::InvalidArgument`] when the `=` is missing or the name
/// is empty.
pub fn parse_assignment(text: &str) -> CliResult<(String, String)> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| CliError::InvalidArgument(format!("expected name=value, got {text}")))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::InvalidArgument(format!("override name is empty in {text}")));
    }
    Ok((name.to_string(), value.to_string()))
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Renders the metadata document.
///
/// `canonical` selects RFC 8785 bytes; otherwise the document is pretty
/// printed. Both end with a newline.
///
/// # Errors
///
/// Returns [`CliError`] when the registry cannot be built or rendered.
pub fn metadata_document(config: &NativeSessionConfig, canonical: bool) -> CliResult<Vec<u8>> {
    let registry = config.registry()?;
    let reporter = SessionPropertyReporter::new(&registry);
    let mut bytes = if canonical {
        reporter.canonical_bytes()?
    } else {
        serde_json::to_vec_pretty(&reporter.metadata_json()?)
            .map_err(|err| CliError::Output(err.to_string()))?
    };
    bytes.push(b'\n');
    Ok(bytes)
}

/// Resolves the engine config for a set of session overrides.
///
/// Overrides apply in order, so a repeated name keeps its last value.
///
/// # Errors
///
/// Returns [`CliError`] when the registry cannot be built.
pub fn resolve_engine_config(
    config: &NativeSessionConfig,
    overrides: &[(String, String)],
) -> CliResult<BTreeMap<String, String>> {
    let registry = config.registry()?;
    let resolved = registry.engine_config(overrides.iter().map(|(name, value)| (name, value)));
    Ok(resolved.into_iter().collect())
}

/// Renders a resolved engine config as pretty JSON with a trailing newline.
///
/// # Errors
///
/// Returns [`CliError::Output`] when serialization fails.
pub fn render_engine_config(resolved: &BTreeMap<String, String>) -> CliResult<Vec<u8>> {
    let mut bytes =
        serde_json::to_vec_pretty(resolved).map_err(|err| CliError::Output(err.to_string()))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Returns the contract output directory: the flag if given, else the config.
#[must_use]
pub fn contract_output_dir(config: &NativeSessionConfig, out: Option<&Path>) -> PathBuf {
    out.map_or_else(|| config.contract.output_path(), Path::to_path_buf)
}

/// Writes the contract bundle.
///
/// # Errors
///
/// Returns [`CliError::Contract`] when writing fails.
pub fn generate_contract(
    config: &NativeSessionConfig,
    out: Option<&Path>,
) -> CliResult<ContractManifest> {
    let output_dir = contract_output_dir(config, out);
    let builder = ContractBuilder::new(output_dir).with_engine_defaults(config.engine_defaults());
    Ok(builder.write()?)
}

/// Verifies an on-disk contract bundle and returns the checked directory.
///
/// # Errors
///
/// Returns [`CliError::Contract`] when the bundle drifted.
pub fn check_contract(config: &NativeSessionConfig, out: Option<&Path>) -> CliResult<PathBuf> {
    let output_dir = contract_output_dir(config, out);
    let builder =
        ContractBuilder::new(output_dir.clone()).with_engine_defaults(config.engine_defaults());
    builder.verify_output(&output_dir)?;
    Ok(output_dir)
}
