// crates/native-session-core/src/lib.rs
// ============================================================================
// Module: Native Session Core Library
// Description: Typed session property registry and metadata reporter.
// Purpose: Single source of truth for native worker session properties.
// Dependencies: serde, serde_json, serde_jcs, thiserror
// ============================================================================

//! ## Overview
//! `native-session-core` defines the session properties a native query worker
//! exposes to its coordinator. It provides:
//! - a closed, typed property model ([`property`]),
//! - the built-in catalog as data ([`catalog`]),
//! - the engine-defaults dependency ([`engine`]),
//! - the registry that resolves defaults and merges session overrides into
//!   engine config ([`registry`]),
//! - the reporter that renders the coordinator metadata document
//!   ([`reporter`]),
//! - structured audit sinks ([`audit`]).

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod catalog;
pub mod engine;
pub mod property;
pub mod registry;
pub mod reporter;

// ============================================================================
// SECTION: Errors
// ============================================================================

use thiserror::Error;

/// Errors raised when building registries or rendering metadata.
///
/// # Invariants
/// - Variants carry the offending property name where one exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two catalog rows share a public name.
    #[error("duplicate session property: {0}")]
    DuplicateProperty(String),
    /// A catalog row has an empty public name.
    #[error("session property name must be non-empty")]
    EmptyName,
    /// A default value does not match the declared kind.
    #[error("default for session property {property} is {actual}, expected {expected}")]
    KindMismatch {
        /// Property name.
        property: String,
        /// Declared kind.
        expected: PropertyKind,
        /// Kind of the supplied default.
        actual: PropertyKind,
    },
    /// Metadata serialization or parsing failed.
    #[error("metadata serialization error: {0}")]
    Serialization(String),
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::SessionAuditSink;
pub use audit::StderrAuditSink;
pub use catalog::BUILTIN_CATALOG;
pub use catalog::PropertySpec;
pub use engine::EngineDefaults;
pub use engine::StaticEngineDefaults;
pub use property::PropertyKind;
pub use property::PropertyValue;
pub use property::SessionProperty;
pub use registry::EngineConfig;
pub use registry::SessionPropertyRegistry;
pub use reporter::SessionPropertyMetadata;
pub use reporter::SessionPropertyReporter;
