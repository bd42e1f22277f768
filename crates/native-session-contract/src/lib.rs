// crates/native-session-contract/src/lib.rs
// ============================================================================
// Module: Native Session Contract Library
// Description: Deterministic contract artifacts for session properties.
// Purpose: Publish the metadata document and its companions as a bundle.
// Dependencies: native-session-core, native-session-config, serde, thiserror
// ============================================================================

//! ## Overview
//! The contract bundle is the on-disk form of what a worker reports to its
//! coordinator: the metadata document, a schema for it, a markdown reference,
//! and the configuration schema and example. A digest manifest lets tooling
//! detect drift between a checked-in bundle and the current catalog.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod contract;
pub mod hashing;
pub mod markdown;
pub mod schemas;
pub mod types;

// ============================================================================
// SECTION: Errors
// ============================================================================

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised when generating or verifying contract artifacts.
///
/// # Invariants
/// - [`ContractError::OutputPath`] always includes the offending path.
#[derive(Debug, Error)]
pub enum ContractError {
    /// IO failure while reading or writing artifacts.
    #[error("io error: {0}")]
    Io(String),
    /// Serialization failure while rendering artifacts.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// Contract generation or verification failed.
    #[error("contract generation error: {0}")]
    Generation(String),
    /// Output path invalid or inaccessible.
    #[error("invalid output path: {}", .0.display())]
    OutputPath(PathBuf),
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use contract::ContractBuilder;
pub use contract::MANIFEST_FILE;
pub use contract::METADATA_ARTIFACT;
pub use hashing::HashAlgorithm;
pub use hashing::HashDigest;
pub use types::ContractArtifact;
pub use types::ContractBundle;
pub use types::ContractManifest;
pub use types::ManifestArtifact;
