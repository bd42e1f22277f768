// crates/native-session-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example `native-session.toml`. The output is static and kept in
//! sync with the schema; the contract bundle ships it verbatim.

/// Returns a canonical example `native-session.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"# Engine defaults layered over the built-in engine table.
# Keys are engine-internal config keys, values are strings.
[engine.defaults]
max_spill_level = "6"
spill_compression_codec = "zstd"
"expression.eval_simplified" = "true"

[audit]
sink = "file"
path = "native-session-audit.jsonl"

[contract]
output_dir = "session-contract"
"#,
    )
}
