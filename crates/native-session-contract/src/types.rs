// crates/native-session-contract/src/types.rs
// ============================================================================
// Module: Contract Types
// Description: Data models for the session property contract bundle.
// Purpose: Canonical shapes for artifacts and the digest manifest.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A bundle is a set of artifacts plus a manifest (`index.json`) listing each
//! artifact's path, content type, and digest, ordered by path.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::hashing::HashAlgorithm;
use crate::hashing::HashDigest;

// ============================================================================
// SECTION: Manifest Types
// ============================================================================

/// Manifest describing the generated contract artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractManifest {
    /// Contract version identifier (matches the crate version).
    pub contract_version: String,
    /// Hash algorithm used for artifact digests.
    pub hash_algorithm: HashAlgorithm,
    /// Number of session properties in the metadata document.
    pub property_count: usize,
    /// Artifacts included in the bundle, ordered by path.
    pub artifacts: Vec<ManifestArtifact>,
}

/// Manifest entry describing a single artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestArtifact {
    /// Relative artifact path under the output directory.
    pub path: String,
    /// Artifact content type.
    pub content_type: String,
    /// Content digest for the artifact payload.
    pub digest: HashDigest,
}

// ============================================================================
// SECTION: Bundle Types
// ============================================================================

/// Generated contract bundle with artifacts and manifest metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractBundle {
    /// Manifest describing the artifacts.
    pub manifest: ContractManifest,
    /// Artifact payloads included in the bundle.
    pub artifacts: Vec<ContractArtifact>,
}

impl ContractBundle {
    /// Returns the artifact stored at a relative path.
    #[must_use]
    pub fn artifact(&self, path: &str) -> Option<&ContractArtifact> {
        self.artifacts.iter().find(|artifact| artifact.path == path)
    }
}

/// Artifact payload with content bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractArtifact {
    /// Relative artifact path under the output directory.
    pub path: String,
    /// MIME content type for the artifact.
    pub content_type: String,
    /// Serialized artifact payload bytes.
    pub bytes: Vec<u8>,
}
