// crates/native-session-core/src/registry/tests.rs
// ============================================================================
// Module: Session Property Registry Unit Tests
// Description: Unit coverage for registry construction and merge auditing.
// Purpose: Ensure permissive outcomes stay observable through audit events.
// Dependencies: native-session-core
// ============================================================================

//! ## Overview
//! Exercises catalog validation, engine default parsing, and the audit events
//! emitted by construction and merge passes.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use super::*;
use crate::audit::MergePass;
use crate::catalog::LiteralDefault;
use crate::catalog::names;
use crate::engine::StaticEngineDefaults;
use crate::engine::keys;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Audit sink that keeps every event in memory.
#[derive(Default)]
struct RecordingSink {
    /// Construction events.
    registry: Mutex<Vec<RegistryBuiltEvent>>,
    /// Merge events.
    merges: Mutex<Vec<SessionMergeEvent>>,
}

impl SessionAuditSink for RecordingSink {
    fn record_registry(&self, event: &RegistryBuiltEvent) {
        self.registry.lock().unwrap().push(event.clone());
    }

    fn record_merge(&self, event: &SessionMergeEvent) {
        self.merges.lock().unwrap().push(event.clone());
    }
}

/// Builds a single-row catalog entry.
const fn spec(name: &'static str, kind: PropertyKind, default: DefaultPolicy) -> PropertySpec {
    PropertySpec {
        name,
        description: "test property",
        kind,
        hidden: false,
        internal_config_key: "test.key",
        default,
    }
}

// ============================================================================
// SECTION: Construction
// ============================================================================

#[test]
fn builtin_catalog_registers_every_row() {
    let sink = Arc::new(RecordingSink::default());
    let registry = SessionPropertyRegistry::with_audit(&StaticEngineDefaults::builtin(), sink.clone());

    assert_eq!(registry.len(), BUILTIN_CATALOG.len());
    let events = sink.registry.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert!(events[0].skipped_rows.is_empty());
    assert_eq!(events[0].literal_defaults, 2);
    assert_eq!(events[0].engine_defaults, 15);
    assert_eq!(events[0].missing_defaults, vec![names::SPILL_FILE_CREATE_CONFIG.to_string()]);
}

#[test]
fn empty_engine_leaves_only_literal_defaults() {
    let registry = SessionPropertyRegistry::new(&StaticEngineDefaults::empty());
    let with_default: Vec<&str> = registry
        .iter()
        .filter(|property| property.default().is_some())
        .map(SessionProperty::name)
        .collect();
    assert_eq!(with_default, vec![names::DRIVER_CPU_TIME_SLICE_LIMIT_MS, names::LEGACY_TIMESTAMP]);
}

#[test]
fn unparseable_engine_default_yields_no_default() {
    let engine = StaticEngineDefaults::builtin()
        .with_overrides([(keys::MAX_SPILL_LEVEL, "four"), (keys::JOIN_SPILL_ENABLED, "1")]);
    let registry = SessionPropertyRegistry::new(&engine);

    let level = registry.get(names::MAX_SPILL_LEVEL).unwrap();
    assert_eq!(level.default(), None);
    assert_eq!(level.default_value(), "");
    let join = registry.get(names::JOIN_SPILL_ENABLED).unwrap();
    assert_eq!(join.default(), None);
}

#[test]
fn engine_defaults_are_trimmed_before_parsing() {
    let engine = StaticEngineDefaults::builtin().with_overrides([(keys::MAX_SPILL_LEVEL, " 7 ")]);
    let registry = SessionPropertyRegistry::new(&engine);
    assert_eq!(
        registry.get(names::MAX_SPILL_LEVEL).unwrap().default(),
        Some(&PropertyValue::Integer(7))
    );
}

#[test]
fn string_engine_defaults_are_trimmed_and_blank_means_none() {
    let engine = StaticEngineDefaults::builtin().with_overrides([
        (keys::SPILL_FILE_CREATE_CONFIG, "   "),
        (keys::SPILL_COMPRESSION_KIND, " zstd "),
    ]);
    let registry = SessionPropertyRegistry::new(&engine);

    let create_config = registry.get(names::SPILL_FILE_CREATE_CONFIG).unwrap();
    assert_eq!(create_config.default(), None);
    assert_eq!(create_config.default_value(), "");
    let codec = registry.get(names::SPILL_COMPRESSION_CODEC).unwrap();
    assert_eq!(codec.default(), Some(&PropertyValue::String(String::from("zstd"))));

    let mut output = EngineConfig::new();
    registry.apply_defaults(&mut output);
    assert!(!output.contains_key(keys::SPILL_FILE_CREATE_CONFIG));
    assert_eq!(output.get(keys::SPILL_COMPRESSION_KIND).map(String::as_str), Some("zstd"));
}

#[test]
fn string_engine_defaults_keep_inner_whitespace() {
    let engine = StaticEngineDefaults::builtin()
        .with_overrides([(keys::SPILL_FILE_CREATE_CONFIG, " mode=a  sync=b\t")]);
    let registry = SessionPropertyRegistry::new(&engine);
    assert_eq!(
        registry.get(names::SPILL_FILE_CREATE_CONFIG).unwrap().default_value(),
        "mode=a  sync=b"
    );
}

#[test]
fn literal_defaults_ignore_engine_values() {
    let engine = StaticEngineDefaults::builtin()
        .with_overrides([(keys::DRIVER_CPU_TIME_SLICE_LIMIT_MS, "25")]);
    let registry = SessionPropertyRegistry::new(&engine);
    assert_eq!(registry.get(names::DRIVER_CPU_TIME_SLICE_LIMIT_MS).unwrap().default_value(), "1000");
}

#[test]
fn from_catalog_rejects_duplicate_names() {
    let specs = [
        spec("dup", PropertyKind::Integer, DefaultPolicy::Literal(LiteralDefault::Integer(1))),
        spec("dup", PropertyKind::Integer, DefaultPolicy::Literal(LiteralDefault::Integer(2))),
    ];
    let err = SessionPropertyRegistry::from_catalog(
        &specs,
        &StaticEngineDefaults::empty(),
        Arc::new(NoopAuditSink),
    )
    .unwrap_err();
    assert_eq!(err, RegistryError::DuplicateProperty(String::from("dup")));
}

#[test]
fn from_catalog_rejects_empty_name() {
    let specs = [spec("", PropertyKind::Boolean, DefaultPolicy::Engine)];
    let err = SessionPropertyRegistry::from_catalog(
        &specs,
        &StaticEngineDefaults::empty(),
        Arc::new(NoopAuditSink),
    )
    .unwrap_err();
    assert_eq!(err, RegistryError::EmptyName);
}

#[test]
fn from_catalog_rejects_mismatched_literal() {
    let specs =
        [spec("flag", PropertyKind::Boolean, DefaultPolicy::Literal(LiteralDefault::Integer(1)))];
    let err = SessionPropertyRegistry::from_catalog(
        &specs,
        &StaticEngineDefaults::empty(),
        Arc::new(NoopAuditSink),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::KindMismatch {
            expected: PropertyKind::Boolean,
            actual: PropertyKind::Integer,
            ..
        }
    ));
}

#[test]
fn unknown_kind_never_takes_a_default() {
    let specs = [spec("mystery", PropertyKind::Unknown, DefaultPolicy::Engine)];
    let engine = StaticEngineDefaults::empty().with_overrides([("test.key", "3.5")]);
    let registry =
        SessionPropertyRegistry::from_catalog(&specs, &engine, Arc::new(NoopAuditSink)).unwrap();
    let property = registry.get("mystery").unwrap();
    assert_eq!(property.kind(), PropertyKind::Unknown);
    assert_eq!(property.default_value(), "");
}

// ============================================================================
// SECTION: Translation and Merging
// ============================================================================

#[test]
fn public_name_reverses_translation() {
    let registry = SessionPropertyRegistry::new(&StaticEngineDefaults::builtin());
    assert_eq!(registry.public_name(keys::ADJUST_TIMESTAMP_TO_TIMEZONE), Some(names::LEGACY_TIMESTAMP));
    assert_eq!(registry.public_name("not_an_engine_key"), None);
    assert_eq!(registry.internal_config_key(names::LEGACY_TIMESTAMP), keys::ADJUST_TIMESTAMP_TO_TIMEZONE);
    assert_eq!(registry.internal_config_key("raw.engine.key"), "raw.engine.key");
}

#[test]
fn merge_passes_report_passthrough_names() {
    let sink = Arc::new(RecordingSink::default());
    let registry = SessionPropertyRegistry::with_audit(&StaticEngineDefaults::builtin(), sink.clone());
    let overrides = BTreeMap::from([
        (String::from("zeta_unknown"), String::from("1")),
        (String::from(names::JOIN_SPILL_ENABLED), String::from("false")),
        (String::from("alpha_unknown"), String::from("2")),
    ]);

    let config = registry.engine_config(&overrides);

    assert_eq!(config.get(keys::JOIN_SPILL_ENABLED).map(String::as_str), Some("false"));
    let merges = sink.merges.lock().unwrap();
    assert_eq!(merges.len(), 2);
    assert_eq!(merges[0].pass, MergePass::Defaults);
    assert_eq!(merges[0].entries_written, 17);
    assert_eq!(merges[1].pass, MergePass::Overrides);
    assert_eq!(merges[1].entries_written, 3);
    assert_eq!(merges[1].passthrough_keys, vec![
        String::from("alpha_unknown"),
        String::from("zeta_unknown")
    ]);
}
