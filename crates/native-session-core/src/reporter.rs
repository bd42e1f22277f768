// crates/native-session-core/src/reporter.rs
// ============================================================================
// Module: Session Property Reporter
// Description: Projection of the registry into coordinator metadata records.
// Purpose: Render a stable, name-ordered session property metadata document.
// Dependencies: crate::registry, serde, serde_json, serde_jcs
// ============================================================================

//! ## Overview
//! The reporter is a read-only view over a [`SessionPropertyRegistry`]. Each
//! property becomes one [`SessionPropertyMetadata`] record; records follow the
//! registry's ascending name order. Hidden properties are reported with
//! `hidden: true` and left for the caller to filter.
//!
//! Field names (`typeSignature`, `defaultValue`) are a compatibility surface
//! for the coordinator and must not change.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::RegistryError;
use crate::property::PropertyKind;
use crate::property::SessionProperty;
use crate::registry::SessionPropertyRegistry;

// ============================================================================
// SECTION: Metadata Records
// ============================================================================

/// Metadata record for one session property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPropertyMetadata {
    /// Public property name.
    pub name: String,
    /// Property description.
    pub description: String,
    /// SQL type signature (`integer`, `boolean`, `bigint`, `varchar`, `UnknownType`).
    pub type_signature: String,
    /// Rendered default, empty when absent.
    pub default_value: String,
    /// Hidden from listings.
    pub hidden: bool,
}

impl SessionPropertyMetadata {
    /// Projects a property into its metadata record.
    #[must_use]
    pub fn from_property(property: &SessionProperty) -> Self {
        Self {
            name: property.name().to_string(),
            description: property.description().to_string(),
            type_signature: property.kind().type_signature().to_string(),
            default_value: property.default_value(),
            hidden: property.is_hidden(),
        }
    }

    /// Returns the kind named by the type signature.
    #[must_use]
    pub fn kind(&self) -> PropertyKind {
        PropertyKind::from_type_signature(&self.type_signature)
    }
}

// ============================================================================
// SECTION: Reporter
// ============================================================================

/// Read-only metadata reporter over a registry.
#[derive(Debug, Clone, Copy)]
pub struct SessionPropertyReporter<'a> {
    /// Registry being reported.
    registry: &'a SessionPropertyRegistry,
}

impl<'a> SessionPropertyReporter<'a> {
    /// Creates a reporter for the registry.
    #[must_use]
    pub const fn new(registry: &'a SessionPropertyRegistry) -> Self {
        Self {
            registry,
        }
    }

    /// Returns one record per property, ordered by name.
    #[must_use]
    pub fn metadata(&self) -> Vec<SessionPropertyMetadata> {
        self.registry.iter().map(SessionPropertyMetadata::from_property).collect()
    }

    /// Returns the metadata document as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Serialization`] when rendering fails.
    pub fn metadata_json(&self) -> Result<Value, RegistryError> {
        serde_json::to_value(self.metadata())
            .map_err(|err| RegistryError::Serialization(err.to_string()))
    }

    /// Returns the metadata document as RFC 8785 canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Serialization`] when rendering fails.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, RegistryError> {
        serde_jcs::to_vec(&self.metadata())
            .map_err(|err| RegistryError::Serialization(err.to_string()))
    }
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses a metadata document produced by a worker.
///
/// # Errors
///
/// Returns [`RegistryError::Serialization`] when the payload is not a valid
/// metadata array.
pub fn parse_metadata(bytes: &[u8]) -> Result<Vec<SessionPropertyMetadata>, RegistryError> {
    serde_json::from_slice(bytes).map_err(|err| RegistryError::Serialization(err.to_string()))
}
