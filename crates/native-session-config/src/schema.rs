// crates/native-session-config/src/schema.rs
// ============================================================================
// Module: Config Schemas
// Description: JSON schema builder for native-session.toml.
// Purpose: Provide canonical validation schema for config artifacts.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! JSON Schema (draft 2020-12) for the native session configuration file. The
//! limits mirror the checks in [`crate::config`] so tooling rejects the same
//! inputs the loader does.

use serde_json::Value;
use serde_json::json;

use crate::config::DEFAULT_CONTRACT_OUTPUT_DIR;
use crate::config::MAX_ENGINE_DEFAULTS;
use crate::config::MAX_ENGINE_KEY_LENGTH;
use crate::config::MAX_TOTAL_PATH_LENGTH;

/// Returns the JSON schema for `native-session.toml`.
#[must_use]
pub fn config_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "native-session://contract/schemas/config.schema.json",
        "title": "Native Session Property Configuration",
        "description": "Engine default overrides, audit routing, and contract output.",
        "type": "object",
        "properties": {
            "engine": engine_section_schema(),
            "audit": audit_config_schema(),
            "contract": contract_config_schema()
        },
        "additionalProperties": false
    })
}

// ============================================================================
// SECTION: Sections
// ============================================================================

/// Schema for the engine defaults section.
fn engine_section_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "defaults": {
                "type": "object",
                "maxProperties": MAX_ENGINE_DEFAULTS,
                "propertyNames": {
                    "minLength": 1,
                    "maxLength": MAX_ENGINE_KEY_LENGTH
                },
                "additionalProperties": { "type": "string" },
                "default": {},
                "description": "Engine-internal key to default value, layered over built-in defaults."
            }
        },
        "additionalProperties": false
    })
}

/// Schema for the audit section.
fn audit_config_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "sink": {
                "type": "string",
                "enum": ["none", "stderr", "file"],
                "default": "none",
                "description": "Destination for registry and merge audit events."
            },
            "path": path_schema("Audit log path (JSON lines); required for the file sink.")
        },
        "allOf": [
            {
                "if": {
                    "properties": { "sink": { "const": "file" } },
                    "required": ["sink"]
                },
                "then": { "required": ["path"] }
            }
        ],
        "additionalProperties": false
    })
}

/// Schema for the contract section.
fn contract_config_schema() -> Value {
    let mut output_dir = path_schema("Directory receiving generated contract artifacts.");
    if let Some(object) = output_dir.as_object_mut() {
        object.insert("default".to_string(), json!(DEFAULT_CONTRACT_OUTPUT_DIR));
    }
    json!({
        "type": "object",
        "properties": {
            "output_dir": output_dir
        },
        "additionalProperties": false
    })
}

/// Schema for a bounded, non-empty path string.
fn path_schema(description: &str) -> Value {
    json!({
        "type": "string",
        "minLength": 1,
        "maxLength": MAX_TOTAL_PATH_LENGTH,
        "description": description
    })
}
