// crates/native-session-core/src/engine.rs
// ============================================================================
// Module: Engine Config Defaults
// Description: Lookup interface for the execution engine's built-in defaults.
// Purpose: Decouple registry construction from the engine's config store.
// Dependencies: std::collections
// ============================================================================

//! ## Overview
//! The registry derives most property defaults from the execution engine's own
//! built-in config defaults. That store is an external collaborator, so it is
//! modeled as the [`EngineDefaults`] trait and passed into the registry
//! constructor explicitly.
//!
//! [`StaticEngineDefaults::builtin`] carries the engine defaults for every key
//! referenced by the built-in catalog; deployments may layer overrides on top
//! of it from configuration.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

// ============================================================================
// SECTION: Engine Config Keys
// ============================================================================

/// Engine-internal config keys referenced by the built-in catalog.
pub mod keys {
    /// Max memory a final aggregation can use before spilling.
    pub const AGGREGATION_SPILL_MEMORY_THRESHOLD: &str = "aggregation_spill_memory_threshold";
    /// Simplified expression evaluation toggle.
    pub const EXPR_EVAL_SIMPLIFIED: &str = "expression.eval_simplified";
    /// Max memory a hash join can use before spilling.
    pub const JOIN_SPILL_MEMORY_THRESHOLD: &str = "join_spill_memory_threshold";
    /// Max memory an order by can use before spilling.
    pub const ORDER_BY_SPILL_MEMORY_THRESHOLD: &str = "order_by_spill_memory_threshold";
    /// Max spilling level for hash join build.
    pub const MAX_SPILL_LEVEL: &str = "max_spill_level";
    /// Max spill file size.
    pub const MAX_SPILL_FILE_SIZE: &str = "max_spill_file_size";
    /// Spill compression codec.
    pub const SPILL_COMPRESSION_KIND: &str = "spill_compression_codec";
    /// Spill write buffer size in bytes.
    pub const SPILL_WRITE_BUFFER_SIZE: &str = "spill_write_buffer_size";
    /// Free-form spill file creation config.
    pub const SPILL_FILE_CREATE_CONFIG: &str = "spill_file_create_config";
    /// Join spilling toggle.
    pub const JOIN_SPILL_ENABLED: &str = "join_spill_enabled";
    /// Window spilling toggle.
    pub const WINDOW_SPILL_ENABLED: &str = "window_spill_enabled";
    /// Writer spilling toggle.
    pub const WRITER_SPILL_ENABLED: &str = "writer_spill_enabled";
    /// Row number spilling toggle.
    pub const ROW_NUMBER_SPILL_ENABLED: &str = "row_number_spill_enabled";
    /// Spill partition bits for hash join and row number.
    pub const JOIN_SPILL_PARTITION_BITS: &str = "join_spiller_partition_bits";
    /// Top-N row number spilling toggle.
    pub const TOPN_ROW_NUMBER_SPILL_ENABLED: &str = "topn_row_number_spill_enabled";
    /// Operator output validation toggle.
    pub const VALIDATE_OUTPUT_FROM_OPERATORS: &str = "debug.validate_output_from_operators";
    /// Timestamp adjustment to the session time zone.
    pub const ADJUST_TIMESTAMP_TO_TIMEZONE: &str = "adjust_timestamp_to_session_timezone";
    /// Driver cpu time slice limit in milliseconds.
    pub const DRIVER_CPU_TIME_SLICE_LIMIT_MS: &str = "driver_cpu_time_slice_limit_ms";
}

/// Engine built-in defaults for the keys above, as the engine reports them.
const BUILTIN_ENGINE_DEFAULTS: &[(&str, &str)] = &[
    (keys::AGGREGATION_SPILL_MEMORY_THRESHOLD, "0"),
    (keys::EXPR_EVAL_SIMPLIFIED, "false"),
    (keys::JOIN_SPILL_MEMORY_THRESHOLD, "0"),
    (keys::ORDER_BY_SPILL_MEMORY_THRESHOLD, "0"),
    (keys::MAX_SPILL_LEVEL, "4"),
    (keys::MAX_SPILL_FILE_SIZE, "0"),
    (keys::SPILL_COMPRESSION_KIND, "none"),
    (keys::SPILL_WRITE_BUFFER_SIZE, "1048576"),
    (keys::SPILL_FILE_CREATE_CONFIG, ""),
    (keys::JOIN_SPILL_ENABLED, "true"),
    (keys::WINDOW_SPILL_ENABLED, "true"),
    (keys::WRITER_SPILL_ENABLED, "true"),
    (keys::ROW_NUMBER_SPILL_ENABLED, "true"),
    (keys::JOIN_SPILL_PARTITION_BITS, "2"),
    (keys::TOPN_ROW_NUMBER_SPILL_ENABLED, "true"),
    (keys::VALIDATE_OUTPUT_FROM_OPERATORS, "false"),
    (keys::ADJUST_TIMESTAMP_TO_TIMEZONE, "false"),
    (keys::DRIVER_CPU_TIME_SLICE_LIMIT_MS, "0"),
];

// ============================================================================
// SECTION: Engine Defaults Interface
// ============================================================================

/// Source of the execution engine's built-in config defaults.
pub trait EngineDefaults {
    /// Returns the engine's built-in default for an internal config key.
    ///
    /// `None` and `Some("")` both mean the engine has no default for the key.
    fn builtin_default(&self, internal_key: &str) -> Option<String>;
}

// ============================================================================
// SECTION: Static Engine Defaults
// ============================================================================

/// In-memory engine defaults table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticEngineDefaults {
    /// Defaults keyed by internal config key.
    values: BTreeMap<String, String>,
}

impl StaticEngineDefaults {
    /// Creates an empty table (the engine reports no defaults).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a table holding the engine's built-in defaults.
    #[must_use]
    pub fn builtin() -> Self {
        let values = BUILTIN_ENGINE_DEFAULTS
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        Self {
            values,
        }
    }

    /// Returns a copy with the provided entries layered over this table.
    #[must_use]
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in overrides {
            self.values.insert(key.into(), value.into());
        }
        self
    }

    /// Returns the number of keys in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when the table holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl EngineDefaults for StaticEngineDefaults {
    fn builtin_default(&self, internal_key: &str) -> Option<String> {
        self.values.get(internal_key).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StaticEngineDefaults {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::empty().with_overrides(iter)
    }
}
