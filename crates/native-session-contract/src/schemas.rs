// crates/native-session-contract/src/schemas.rs
// ============================================================================
// Module: Metadata Schemas
// Description: JSON schema for the session property metadata document.
// Purpose: Let coordinators and tooling validate worker metadata payloads.
// Dependencies: native-session-core, serde_json
// ============================================================================

//! ## Overview
//! The metadata document is an array of records with exactly five fields.
//! `typeSignature` is restricted to the labels produced by
//! [`PropertyKind::type_signature`].

use native_session_core::PropertyKind;
use serde_json::Value;
use serde_json::json;

/// Returns the JSON schema for the session property metadata document.
#[must_use]
pub fn session_properties_schema() -> Value {
    let signatures: Vec<&str> =
        PropertyKind::all().iter().map(|kind| kind.type_signature()).collect();
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "native-session://contract/schemas/session_properties.schema.json",
        "title": "Native Session Property Metadata",
        "description": "Session properties exposed by a native worker, ordered by name.",
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "minLength": 1,
                    "description": "Public property name."
                },
                "description": {
                    "type": "string",
                    "description": "Human-readable description."
                },
                "typeSignature": {
                    "type": "string",
                    "enum": signatures,
                    "description": "SQL type signature of the property value."
                },
                "defaultValue": {
                    "type": "string",
                    "description": "Rendered default; empty when the engine default applies."
                },
                "hidden": {
                    "type": "boolean",
                    "description": "Hidden from listings; still settable."
                }
            },
            "required": ["name", "description", "typeSignature", "defaultValue", "hidden"],
            "additionalProperties": false
        }
    })
}
