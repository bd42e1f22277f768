// crates/native-session-config/src/lib.rs
// ============================================================================
// Module: Native Session Config Library
// Description: Config model, validation, and artifact generation.
// Purpose: Single source of truth for native-session.toml semantics.
// Dependencies: native-session-core, serde, toml
// ============================================================================

//! ## Overview
//! `native-session-config` defines the configuration consumed by the session
//! property tooling: engine default overrides, audit routing, and contract
//! output location. Loading is strict and fail-closed; the crate also
//! produces the JSON schema and a canonical example for the config file.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
pub use schema::config_schema;
