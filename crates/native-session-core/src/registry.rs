// crates/native-session-core/src/registry.rs
// ============================================================================
// Module: Session Property Registry
// Description: Canonical, name-ordered set of native session properties.
// Purpose: Resolve defaults and translate session overrides to engine keys.
// Dependencies: crate::catalog, crate::engine, crate::property, crate::audit
// ============================================================================

//! ## Overview
//! The registry owns every session property exposed by the worker, keyed and
//! ordered by public name. It is populated once from a catalog and is
//! read-only afterwards, so shared references are safe across threads.
//!
//! Two merge passes write into a caller-owned engine config map:
//! [`SessionPropertyRegistry::apply_defaults`] writes every present default
//! under its internal key, and [`SessionPropertyRegistry::apply_overrides`]
//! writes session overrides under translated keys. Overrides only take
//! precedence when the defaults pass runs first;
//! [`SessionPropertyRegistry::engine_config`] sequences both passes.
//!
//! Unknown override names pass through unchanged and are treated as
//! engine-internal keys. They are reported to the audit sink.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::sync::Arc;

use crate::RegistryError;
use crate::audit::MergePass;
use crate::audit::NoopAuditSink;
use crate::audit::RegistryBuiltEvent;
use crate::audit::SessionAuditSink;
use crate::audit::SessionMergeEvent;
use crate::catalog::BUILTIN_CATALOG;
use crate::catalog::DefaultPolicy;
use crate::catalog::PropertySpec;
use crate::engine::EngineDefaults;
use crate::property::PropertyKind;
use crate::property::PropertyValue;
use crate::property::SessionProperty;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Engine config map keyed by engine-internal config key.
pub type EngineConfig = HashMap<String, String>;

/// Registry of native session properties.
#[derive(Clone)]
pub struct SessionPropertyRegistry {
    /// Properties keyed by public name.
    properties: BTreeMap<String, SessionProperty>,
    /// Audit sink for merge diagnostics.
    audit: Arc<dyn SessionAuditSink>,
}

impl fmt::Debug for SessionPropertyRegistry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SessionPropertyRegistry")
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Construction
// ============================================================================

impl SessionPropertyRegistry {
    /// Builds the registry from the built-in catalog.
    #[must_use]
    pub fn new<E: EngineDefaults + ?Sized>(engine: &E) -> Self {
        Self::with_audit(engine, Arc::new(NoopAuditSink))
    }

    /// Builds the registry from the built-in catalog with an audit sink.
    ///
    /// Catalog rows that cannot be registered are skipped and reported in the
    /// construction event; the built-in catalog has none.
    #[must_use]
    pub fn with_audit<E: EngineDefaults + ?Sized>(
        engine: &E,
        audit: Arc<dyn SessionAuditSink>,
    ) -> Self {
        let mut state = BuildState::default();
        for spec in BUILTIN_CATALOG {
            if let Err(err) = state.register(spec, engine) {
                state.skipped_rows.push(err.to_string());
            }
        }
        state.finish(audit)
    }

    /// Builds a registry from a custom catalog.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateProperty`] when two rows share a name,
    /// [`RegistryError::EmptyName`] for a nameless row, and
    /// [`RegistryError::KindMismatch`] when a literal default does not match
    /// the declared kind.
    pub fn from_catalog<E: EngineDefaults + ?Sized>(
        specs: &[PropertySpec],
        engine: &E,
        audit: Arc<dyn SessionAuditSink>,
    ) -> Result<Self, RegistryError> {
        let mut state = BuildState::default();
        for spec in specs {
            state.register(spec, engine)?;
        }
        Ok(state.finish(audit))
    }
}

/// Accumulates registered properties and construction statistics.
#[derive(Default)]
struct BuildState {
    /// Registered properties keyed by public name.
    properties: BTreeMap<String, SessionProperty>,
    /// Count of defaults taken from the engine.
    engine_defaults: usize,
    /// Count of literal defaults.
    literal_defaults: usize,
    /// Rows rejected during lenient construction.
    skipped_rows: Vec<String>,
}

impl BuildState {
    /// Resolves and inserts one catalog row. The first row for a name wins.
    fn register<E: EngineDefaults + ?Sized>(
        &mut self,
        spec: &PropertySpec,
        engine: &E,
    ) -> Result<(), RegistryError> {
        let (default, from_engine) = match spec.default {
            DefaultPolicy::Engine => {
                (engine_default(spec.kind, spec.internal_config_key, engine), true)
            }
            DefaultPolicy::Literal(literal) => (Some(literal.to_value()), false),
        };
        let property = SessionProperty::new(
            spec.name,
            spec.description,
            spec.kind,
            spec.hidden,
            spec.internal_config_key,
            default,
        )?;
        match self.properties.entry(spec.name.to_string()) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateProperty(spec.name.to_string())),
            Entry::Vacant(slot) => {
                if property.default().is_some() {
                    if from_engine {
                        self.engine_defaults += 1;
                    } else {
                        self.literal_defaults += 1;
                    }
                }
                slot.insert(property);
                Ok(())
            }
        }
    }

    /// Emits the construction event and produces the registry.
    fn finish(self, audit: Arc<dyn SessionAuditSink>) -> SessionPropertyRegistry {
        let missing_defaults = self
            .properties
            .values()
            .filter(|property| property.default().is_none())
            .map(|property| property.name().to_string())
            .collect();
        let mut event = RegistryBuiltEvent::new(
            self.properties.len(),
            self.engine_defaults,
            self.literal_defaults,
            missing_defaults,
        );
        event.skipped_rows = self.skipped_rows;
        audit.record_registry(&event);
        SessionPropertyRegistry {
            properties: self.properties,
            audit,
        }
    }
}

/// Queries the engine default for a key and parses it into `kind`.
///
/// Empty or unparseable engine values yield no default.
fn engine_default<E: EngineDefaults + ?Sized>(
    kind: PropertyKind,
    internal_key: &str,
    engine: &E,
) -> Option<PropertyValue> {
    let raw = engine.builtin_default(internal_key)?;
    if raw.is_empty() {
        return None;
    }
    kind.parse_value(&raw)
}

// ============================================================================
// SECTION: Read Access
// ============================================================================

impl SessionPropertyRegistry {
    /// Returns all properties ordered by public name.
    #[must_use]
    pub const fn properties(&self) -> &BTreeMap<String, SessionProperty> {
        &self.properties
    }

    /// Returns the property registered under a public name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SessionProperty> {
        self.properties.get(name)
    }

    /// Iterates properties in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = &SessionProperty> {
        self.properties.values()
    }

    /// Returns the number of registered properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true when no properties are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Translates a public name to its engine-internal key.
    ///
    /// Names the registry does not know are returned unchanged.
    #[must_use]
    pub fn internal_config_key<'a>(&'a self, name: &'a str) -> &'a str {
        self.properties.get(name).map_or(name, SessionProperty::internal_config_key)
    }

    /// Returns the public name mapped to an engine-internal key, if any.
    #[must_use]
    pub fn public_name(&self, internal_key: &str) -> Option<&str> {
        self.properties
            .values()
            .find(|property| property.internal_config_key() == internal_key)
            .map(SessionProperty::name)
    }
}

// ============================================================================
// SECTION: Engine Config Merging
// ============================================================================

impl SessionPropertyRegistry {
    /// Writes every present default into `output` under its internal key.
    ///
    /// Existing entries are overwritten; properties without a default are
    /// skipped so the engine keeps its own default.
    pub fn apply_defaults(&self, output: &mut EngineConfig) {
        let mut written = 0;
        for property in self.properties.values() {
            if let Some(value) = property.default() {
                output.insert(property.internal_config_key().to_string(), value.render());
                written += 1;
            }
        }
        self.audit.record_merge(&SessionMergeEvent::new(MergePass::Defaults, written, Vec::new()));
    }

    /// Writes session overrides into `output` under translated keys.
    ///
    /// Must run after [`SessionPropertyRegistry::apply_defaults`] for overrides
    /// to take precedence over defaults.
    pub fn apply_overrides<I, K, V>(&self, output: &mut EngineConfig, overrides: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut written = 0;
        let mut passthrough = Vec::new();
        for (name, value) in overrides {
            let name = name.as_ref();
            let key = match self.properties.get(name) {
                Some(property) => property.internal_config_key(),
                None => {
                    passthrough.push(name.to_string());
                    name
                }
            };
            output.insert(key.to_string(), value.as_ref().to_string());
            written += 1;
        }
        passthrough.sort();
        self.audit.record_merge(&SessionMergeEvent::new(MergePass::Overrides, written, passthrough));
    }

    /// Builds a fresh engine config: defaults first, then session overrides.
    #[must_use]
    pub fn engine_config<I, K, V>(&self, overrides: I) -> EngineConfig
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut output = EngineConfig::new();
        self.apply_defaults(&mut output);
        self.apply_overrides(&mut output, overrides);
        output
    }
}

#[cfg(test)]
mod tests;
