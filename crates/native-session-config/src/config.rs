// crates/native-session-config/src/config.rs
// ============================================================================
// Module: Native Session Configuration
// Description: Configuration loading and validation for session tooling.
// Purpose: Provide strict config parsing with hard limits.
// Dependencies: native-session-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The `[engine]` table layers string defaults over the engine's built-in
//! table, `[audit]` selects where registry events go, and `[contract]` names
//! the artifact output directory. Invalid input fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use native_session_core::FileAuditSink;
use native_session_core::NoopAuditSink;
use native_session_core::SessionAuditSink;
use native_session_core::SessionPropertyRegistry;
use native_session_core::StaticEngineDefaults;
use native_session_core::StderrAuditSink;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "native-session.toml";
/// Environment variable naming the configuration path.
pub const CONFIG_ENV_VAR: &str = "NATIVE_SESSION_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of an engine config key.
pub(crate) const MAX_ENGINE_KEY_LENGTH: usize = 256;
/// Maximum number of engine default entries.
pub(crate) const MAX_ENGINE_DEFAULTS: usize = 1024;
/// Default contract output directory.
pub const DEFAULT_CONTRACT_OUTPUT_DIR: &str = "session-contract";

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Native session tooling configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NativeSessionConfig {
    /// Engine default overrides.
    #[serde(default)]
    pub engine: EngineSection,
    /// Audit event routing.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Contract artifact output.
    #[serde(default)]
    pub contract: ContractConfig,
}

impl NativeSessionConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// An explicit `path` or the `NATIVE_SESSION_CONFIG` variable must point
    /// at a readable file. When neither is set and the default file does not
    /// exist, built-in defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, source) = resolve_path(path, env::var(CONFIG_ENV_VAR).ok())?;
        validate_path(&resolved)?;
        let bytes = match fs::read(&resolved) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound && source == ConfigSource::Default => {
                return Ok(Self::default());
            }
            Err(err) => return Err(ConfigError::Io(err.to_string())),
        };
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.audit.validate()?;
        self.contract.validate()?;
        Ok(())
    }

    /// Returns the engine defaults table with configured entries layered on top.
    #[must_use]
    pub fn engine_defaults(&self) -> StaticEngineDefaults {
        StaticEngineDefaults::builtin().with_overrides(self.engine.defaults.clone())
    }

    /// Builds the built-in registry using configured engine defaults and audit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the audit log cannot be opened.
    pub fn registry(&self) -> Result<SessionPropertyRegistry, ConfigError> {
        let sink = self.audit.build_sink()?;
        Ok(SessionPropertyRegistry::with_audit(&self.engine_defaults(), sink))
    }
}

/// Engine defaults section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineSection {
    /// Engine-internal key to default value, layered over built-in defaults.
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
}

impl EngineSection {
    /// Validates engine default entries.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.defaults.len() > MAX_ENGINE_DEFAULTS {
            return Err(ConfigError::Invalid(format!(
                "engine.defaults exceeds {MAX_ENGINE_DEFAULTS} entries"
            )));
        }
        for key in self.defaults.keys() {
            if key.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "engine.defaults keys must be non-empty".to_string(),
                ));
            }
            if key.len() > MAX_ENGINE_KEY_LENGTH {
                return Err(ConfigError::Invalid(format!(
                    "engine.defaults key exceeds {MAX_ENGINE_KEY_LENGTH} bytes: {key}"
                )));
            }
        }
        Ok(())
    }
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// Discard audit events.
    #[default]
    None,
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to `audit.path`.
    File,
}

/// Audit configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Sink receiving registry and merge events.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Audit log path, required for the file sink.
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (AuditSinkKind::File, None) => Err(missing_audit_path()),
            (_, Some(path)) => validate_path_string("audit.path", path),
            (_, None) => Ok(()),
        }
    }

    /// Builds the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the audit log cannot be opened and
    /// [`ConfigError::Invalid`] when the file sink has no path.
    pub fn build_sink(&self) -> Result<Arc<dyn SessionAuditSink>, ConfigError> {
        match self.sink {
            AuditSinkKind::None => Ok(Arc::new(NoopAuditSink)),
            AuditSinkKind::Stderr => Ok(Arc::new(StderrAuditSink)),
            AuditSinkKind::File => {
                let path = self.path.as_deref().ok_or_else(missing_audit_path)?;
                let sink = FileAuditSink::new(Path::new(path.trim()))
                    .map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Arc::new(sink))
            }
        }
    }
}

/// Contract artifact configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ContractConfig {
    /// Directory receiving generated contract artifacts.
    #[serde(default = "default_contract_output_dir")]
    pub output_dir: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            output_dir: default_contract_output_dir(),
        }
    }
}

impl ContractConfig {
    /// Validates the contract output directory.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("contract.output_dir", &self.output_dir)
    }

    /// Returns the output directory as a path.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(self.output_dir.trim())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Where the resolved config path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigSource {
    /// Path passed by the caller.
    Explicit,
    /// Path read from the environment.
    Environment,
    /// Default file name.
    Default,
}

/// Resolves the config path from the caller, the environment, or the default.
pub(crate) fn resolve_path(
    path: Option<&Path>,
    env_path: Option<String>,
) -> Result<(PathBuf, ConfigSource), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), ConfigSource::Explicit));
    }
    if let Some(env_path) = env_path {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), ConfigSource::Environment));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), ConfigSource::Default))
}

/// Validates the resolved path against length limits.
pub(crate) fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
pub(crate) fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Error for a file audit sink without a path.
fn missing_audit_path() -> ConfigError {
    ConfigError::Invalid("audit.path is required when audit.sink = \"file\"".to_string())
}

/// Default contract output directory.
pub(crate) fn default_contract_output_dir() -> String {
    DEFAULT_CONTRACT_OUTPUT_DIR.to_string()
}
